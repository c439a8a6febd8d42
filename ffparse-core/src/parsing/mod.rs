//! Streaming parsers for ffmpeg/ffprobe output.
//!
//! Lines are assembled by `lines`, checked against the error signatures in
//! `signatures` and routed by the `driver` to one of the decoders: probe
//! sections, tabular listings or the version banner.

pub mod blocks;
pub mod driver;
pub mod lines;
pub mod probe;
pub mod signatures;
pub mod version;

pub use blocks::{BlockParser, field};
pub use driver::{DriverOutcome, Flow, ListingParser, OutputDriver, OutputParser, Passthrough};
pub use lines::LineReader;
pub use probe::{ProbeDecoder, decode_probe};
pub use signatures::{ErrorSignature, SignatureSet};
pub use version::{ToolVersion, VersionParser, parse_version_line};
