fn main() {
    medjudge::cli::checker::run();
}
