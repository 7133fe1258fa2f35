fn main() {
    esc::cli::run();
}
