use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::{self, Write};
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(EnumString, Display, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Encoding {
    #[strum(serialize = "gzip")]
    Gzip,
    #[strum(serialize = "deflate")]
    Deflate,
    #[strum(serialize = "br")]
    Br,
    #[strum(serialize = "identity")]
    Identity,
}

/// Encodings a client may negotiate. Only gzip has an encoder; deflate and
/// br are recognized tokens that can never be selected for the response
/// body, so a client accepting only those gets an identity body.
pub const SUPPORTED: &[Encoding] = &[Encoding::Gzip, Encoding::Deflate, Encoding::Br];

impl Encoding {
    /// Whether the server can actually produce this encoding.
    pub fn is_producible(self) -> bool {
        matches!(self, Encoding::Gzip)
    }
}

/// Splits an Accept-Encoding value into an ordered token list. `;q=`
/// parameters are tolerated and ignored; unknown tokens are dropped
/// silently, never reported as an error.
pub fn parse_accept_encoding(header: &str) -> Vec<Encoding> {
    header
        .split(',')
        .filter_map(|part| part.split(';').next())
        .filter_map(|token| Encoding::from_str(token.trim()).ok())
        .collect()
}

/// The subsequence of `requested` this server supports, client order
/// preserved. Empty input or no overlap means "send identity, omit
/// Content-Encoding".
pub fn negotiate(requested: &[Encoding]) -> Vec<Encoding> {
    requested
        .iter()
        .copied()
        .filter(|e| SUPPORTED.contains(e))
        .collect()
}

pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
