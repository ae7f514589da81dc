fn main() {
    medjudge::cli::runner::run();
}
