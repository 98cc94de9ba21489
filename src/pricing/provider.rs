/// Supported clouds.
///
/// The variant order is the documented tie-break order: wherever two providers
/// price out identically, the earlier variant wins.
#[derive(
    Debug,
    Hash,
    Ord,
    PartialOrd,
    enumset::EnumSetType,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Amazon Web Services.
    #[display("AWS")]
    Aws,

    /// Microsoft Azure.
    #[display("Azure")]
    Azure,
}
