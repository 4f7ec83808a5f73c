use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("lowtide")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Report daylight low tides for a list of beaches")
        .after_help(
            "Locations that cannot be fetched or parsed are left out of the JSON \
and listed on stderr. Use --strict to exit with an error when that happens.",
        )
        .arg(clap::arg!([INPUT] "File with one \"<beach>, <city>\" per line"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: today's date in the current directory)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"no-file" "Only print the JSON to stdout"))
        .arg(
            clap::arg!(-c --config <FILE> "Config file")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"base-url" <URL> "Base URL of the location pages"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(--concurrency <NUM> "Number of locations fetched at once"))
        .arg(clap::arg!(--"max-days" <DAYS> "Only read this many days of each tide table"))
        .arg(clap::arg!(--strict "Exit with an error if any location could not be scraped"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "lowtide", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "lowtide", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "lowtide", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "lowtide", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
