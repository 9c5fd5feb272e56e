use std::collections::BTreeMap;

const INT_START: u8 = b'i';
const LIST_START: u8 = b'l';
const DICT_START: u8 = b'd';
const BEN_END: u8 = b'e';
const BYTE_LEN_END: u8 = b':';

/// A bencode value: integer, byte string, list or dictionary.
///
/// Dictionaries are backed by a `BTreeMap` keyed on raw bytes, so encoding a
/// dictionary always produces the canonical byte-sorted key order no matter
/// how the entries were inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bencode {
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<Bencode>),
    Dict(BTreeMap<Vec<u8>, Bencode>),
}

impl Bencode {
    pub fn new_list() -> Bencode {
        Bencode::List(Vec::new())
    }

    pub fn new_dict() -> Bencode {
        Bencode::Dict(BTreeMap::new())
    }

    pub fn list_mut(&mut self) -> Option<&mut Vec<Bencode>> {
        match self {
            Bencode::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn dict_mut(&mut self) -> Option<&mut BTreeMap<Vec<u8>, Bencode>> {
        match self {
            Bencode::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Encode the value into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.write(&mut bytes);
        bytes
    }

    fn write(&self, bytes: &mut Vec<u8>) {
        match self {
            Bencode::Int(value) => {
                bytes.push(INT_START);
                bytes.extend(value.to_string().into_bytes());
                bytes.push(BEN_END);
            }
            Bencode::Bytes(data) => {
                bytes.extend(data.len().to_string().into_bytes());
                bytes.push(BYTE_LEN_END);
                bytes.extend_from_slice(data);
            }
            Bencode::List(list) => {
                bytes.push(LIST_START);
                for item in list {
                    item.write(bytes);
                }
                bytes.push(BEN_END);
            }
            Bencode::Dict(dict) => {
                bytes.push(DICT_START);
                for (key, value) in dict {
                    bytes.extend(key.len().to_string().into_bytes());
                    bytes.push(BYTE_LEN_END);
                    bytes.extend_from_slice(key);
                    value.write(bytes);
                }
                bytes.push(BEN_END);
            }
        }
    }
}

/// Conversion into raw bencode byte strings, so the macros accept string
/// literals, owned strings and byte vectors alike.
pub trait IntoBenBytes {
    fn into_ben_bytes(self) -> Vec<u8>;
}

impl IntoBenBytes for Vec<u8> {
    fn into_ben_bytes(self) -> Vec<u8> {
        self
    }
}

impl IntoBenBytes for &[u8] {
    fn into_ben_bytes(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl IntoBenBytes for &str {
    fn into_ben_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl IntoBenBytes for String {
    fn into_ben_bytes(self) -> Vec<u8> {
        self.into_bytes()
    }
}

impl IntoBenBytes for &String {
    fn into_ben_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[macro_export]
macro_rules! ben_int {
    ($value:expr) => {
        $crate::bencode::bencode::Bencode::Int($value)
    };
}

#[macro_export]
macro_rules! ben_bytes {
    ($value:expr) => {
        $crate::bencode::bencode::Bencode::Bytes($crate::bencode::bencode::IntoBenBytes::into_ben_bytes($value))
    };
}

#[macro_export]
macro_rules! ben_list {
    () => {
        $crate::bencode::bencode::Bencode::new_list()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::bencode::bencode::Bencode::List(vec![$($value),+])
    };
}

#[macro_export]
macro_rules! ben_map {
    () => {
        $crate::bencode::bencode::Bencode::new_dict()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut dict = ::std::collections::BTreeMap::new();
        $(
            dict.insert($crate::bencode::bencode::IntoBenBytes::into_ben_bytes($key), $value);
        )+
        $crate::bencode::bencode::Bencode::Dict(dict)
    }};
}
