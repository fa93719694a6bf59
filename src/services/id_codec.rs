/*
 * Responsibility
 * - 公開 note ID ↔ 内部 note_id の変換 (encode/decode)
 * - sqids の詳細はここに閉じ込める (extractor / handler はこの service だけを使う)
 * - decode は正規形のみ受け付ける (同じ note に複数の公開 ID が対応しないように)
 *
 * thiserror を使わない理由:
 * - このモジュール内で完結するエラー型なので
 */
use sqids::{Error as SqidsError, Sqids};
use std::{error::Error, fmt};

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug)]
pub enum IdCodecError {
    InvalidMinLength { value: usize },
    Sqids(SqidsError),
    NegativeId { value: i64 },
    DecodeInvalidFormat,
    DecodeOutOfRange,
}

impl fmt::Display for IdCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdCodecError::InvalidMinLength { value } => {
                write!(
                    f,
                    "SQIDS_MIN_LENGTH must be between 0 and 255, got {}",
                    value
                )
            }
            IdCodecError::Sqids(e) => write!(f, "sqids error: {}", e),
            IdCodecError::NegativeId { value } => {
                write!(f, "note id must be non-negative, got {}", value)
            }
            IdCodecError::DecodeInvalidFormat => write!(f, "invalid public note id"),
            IdCodecError::DecodeOutOfRange => write!(f, "decoded note id is out of range"),
        }
    }
}

impl Error for IdCodecError {}

impl From<SqidsError> for IdCodecError {
    fn from(e: SqidsError) -> Self {
        IdCodecError::Sqids(e)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, note_id: i64) -> Result<String> {
        let n = u64::try_from(note_id).map_err(|_| IdCodecError::NegativeId { value: note_id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums.as_slice() else {
            return Err(IdCodecError::DecodeInvalidFormat);
        };

        // sqids decodes some non-canonical strings to valid numbers; accept
        // only the exact string encode() would have produced.
        if self.sqids.encode(&[*n])? != public_id {
            return Err(IdCodecError::DecodeInvalidFormat);
        }

        i64::try_from(*n).map_err(|_| IdCodecError::DecodeOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    fn codec() -> IdCodec {
        IdCodec::new(10, ALPHABET).unwrap()
    }

    #[test]
    fn encoded_ids_respect_min_length_and_decode_back() {
        let codec = codec();
        for id in [1_i64, 42, 9_000_000_000] {
            let public = codec.encode(id).unwrap();
            assert!(public.len() >= 10, "{public}");
            assert_eq!(codec.decode(&public).unwrap(), id);
        }
    }

    #[test]
    fn rejects_negative_ids() {
        assert!(matches!(
            codec().encode(-1),
            Err(IdCodecError::NegativeId { value: -1 })
        ));
    }

    #[test]
    fn rejects_garbage_and_non_canonical_input() {
        let codec = codec();
        assert!(matches!(
            codec.decode(""),
            Err(IdCodecError::DecodeInvalidFormat)
        ));
        assert!(matches!(
            codec.decode("not-an-id!"),
            Err(IdCodecError::DecodeInvalidFormat)
        ));

        let public = codec.encode(5).unwrap();
        let padded = format!("{public}a");
        assert!(codec.decode(&padded).is_err());
    }

    #[test]
    fn rejects_oversized_min_length() {
        assert!(matches!(
            IdCodec::new(256, ALPHABET),
            Err(IdCodecError::InvalidMinLength { value: 256 })
        ));
    }
}
