fn main() {
    // Only the on-device build links against ESP-IDF; host builds of the
    // game-core library must not require the espressif toolchain.
    if std::env::var("CARGO_FEATURE_ESP32").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
