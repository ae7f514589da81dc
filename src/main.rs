fn main() {
    #[cfg(feature = "cli")]
    medjudge::cli::median::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("medjudge: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
