fn main() {
    feast_serving_config::app::cli::run();
}
