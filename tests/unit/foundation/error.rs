use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FamilyError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FamilyError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    let serde: FamilyError = serde_json::from_str::<u32>("x").unwrap_err().into();
    assert!(serde.to_string().starts_with("serialization error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FamilyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let e = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: FamilyError = e.into();
    assert!(matches!(err, FamilyError::Serde(_)));
}
