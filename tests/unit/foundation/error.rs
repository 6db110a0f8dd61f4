use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlassError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GlassError::raster("x").to_string().contains("raster error:"));
    assert!(
        GlassError::backend("x")
            .to_string()
            .contains("backend error:")
    );
    assert!(
        GlassError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlassError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
