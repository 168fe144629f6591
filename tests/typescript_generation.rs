//! TypeScript Generation Tests
//!
//! Validates that racepace types can be exported to TypeScript when the
//! tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, all chart-facing types are configured for export.
    fn assert_type<T: Type>() {}

    // Lap data
    assert_type::<racepace::LapRecord>();
    assert_type::<racepace::LapTable>();
    assert_type::<racepace::TimingValue>();
    assert_type::<racepace::Compound>();
    assert_type::<racepace::TimingColumn>();

    // Cleaning output
    assert_type::<racepace::CleanedLap>();
    assert_type::<racepace::CleanedLapTable>();
    assert_type::<racepace::CleanReport>();
    assert_type::<racepace::CleanerConfig>();

    // Sessions and charts
    assert_type::<racepace::SessionKey>();
    assert_type::<racepace::SessionKind>();
    assert_type::<racepace::analysis::Stint>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let _ = racepace::Compound::Unknown;
}
