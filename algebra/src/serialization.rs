use crate::bn254::{BN254Scalar, BN254G1, BN254G2};
use crate::prelude::*;

/// Helper trait to serialize field and group elements through their canonical byte encodings.
pub trait FromToBytes: Sized {
    /// Convert to bytes.
    fn to_bytes_canonical(&self) -> Vec<u8>;
    /// Reconstruct from bytes.
    fn from_bytes_canonical(bytes: &[u8]) -> Result<Self>;
}

/// Implement `serde::Serialize` and `serde::Deserialize` for a type implementing `FromToBytes`:
/// base64 strings for human-readable formats, raw bytes otherwise.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl $crate::serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                $crate::serialization::obj_serde::serialize(self, serializer)
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                $crate::serialization::obj_serde::deserialize(deserializer)
            }
        }
    };
}

macro_rules! to_from_bytes_scalar {
    ($t:ident) => {
        impl FromToBytes for $t {
            fn to_bytes_canonical(&self) -> Vec<u8> {
                self.to_bytes()
            }
            fn from_bytes_canonical(bytes: &[u8]) -> Result<$t> {
                if bytes.len() != $t::bytes_len() {
                    return Err(AlgebraError::DeserializationError);
                }
                $t::from_bytes(bytes)
            }
        }
    };
}

macro_rules! to_from_bytes_group {
    ($g:ident) => {
        impl FromToBytes for $g {
            fn to_bytes_canonical(&self) -> Vec<u8> {
                self.to_compressed_bytes()
            }
            fn from_bytes_canonical(bytes: &[u8]) -> Result<$g> {
                $g::from_compressed_bytes(bytes)
            }
        }
    };
}

to_from_bytes_scalar!(BN254Scalar);
to_from_bytes_group!(BN254G1);
to_from_bytes_group!(BN254G2);

serialize_deserialize!(BN254Scalar);
serialize_deserialize!(BN254G1);
serialize_deserialize!(BN254G2);

/// Serde glue shared by every `serialize_deserialize!` invocation.
pub mod obj_serde {
    use crate::prelude::*;
    use serde::de::{SeqAccess, Visitor};
    use serde::{Deserializer, Serializer};

    /// Collects either a byte string, a byte sequence or a base64 string.
    pub struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
            formatter.write_str("a valid FromToBytes object")
        }

        fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut vec: Vec<u8> = vec![];
            while let Some(x) = seq.next_element()? {
                vec.push(x);
            }
            Ok(vec)
        }

        fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
        where
            E: serde::de::Error,
        {
            b64dec(v).map_err(serde::de::Error::custom)
        }
    }

    /// Serialize an object through its canonical bytes.
    pub fn serialize<S, T>(obj: &T, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: FromToBytes,
    {
        let bytes = obj.to_bytes_canonical();
        if serializer.is_human_readable() {
            serializer.serialize_str(&b64enc(&bytes))
        } else {
            serializer.serialize_bytes(&bytes[..])
        }
    }

    /// Deserialize an object from its canonical bytes.
    pub fn deserialize<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromToBytes,
    {
        let bytes = if deserializer.is_human_readable() {
            deserializer.deserialize_str(BytesVisitor)?
        } else {
            deserializer.deserialize_bytes(BytesVisitor)?
        };
        T::from_bytes_canonical(bytes.as_slice()).map_err(serde::de::Error::custom)
    }
}
