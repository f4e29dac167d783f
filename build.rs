fn main() {
    // ESP-IDF sysenv propagation only matters for firmware image builds;
    // host test builds skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
