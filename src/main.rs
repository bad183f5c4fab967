fn main() {
    etcdlabs::app::cli::run();
}
