use core::fmt;
use core::str::FromStr;

use govgen_config::Address;
use serde::Serialize;
use serde_json::Value;
use sha3::{Digest, Keccak256};

use crate::EncodeError;

const WORD: usize = 32;

type Word = [u8; WORD];

// PARAMETER TYPES
// ================================================================================================

/// A Solidity ABI parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Bool,
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Signed integer of the given bit width.
    Int(usize),
    /// Fixed-size byte array of the given length.
    FixedBytes(usize),
    Bytes,
    String,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
}

impl ParamType {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_) | Self::FixedArray(..))
    }
}

fn integer_width(digits: &str) -> Option<usize> {
    if digits.is_empty() {
        return Some(256);
    }
    if digits.starts_with('0') {
        return None;
    }
    let bits: usize = digits.parse().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}

impl FromStr for ParamType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(prefix) = s.strip_suffix(']') {
            let open = prefix.rfind('[').ok_or(())?;
            let inner = Box::new(prefix[..open].parse()?);
            let size = &prefix[open + 1..];
            if size.is_empty() {
                return Ok(Self::Array(inner));
            }
            if size.starts_with('0') {
                return Err(());
            }
            let size = size.parse().map_err(|_| ())?;
            return Ok(Self::FixedArray(inner, size));
        }

        match s {
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "bytes" => Ok(Self::Bytes),
            _ => {
                if let Some(bits) = s.strip_prefix("uint") {
                    integer_width(bits).map(Self::Uint).ok_or(())
                } else if let Some(bits) = s.strip_prefix("int") {
                    integer_width(bits).map(Self::Int).ok_or(())
                } else if let Some(len) = s.strip_prefix("bytes") {
                    if len.starts_with('0') {
                        return Err(());
                    }
                    match len.parse() {
                        Ok(len @ 1..=32) => Ok(Self::FixedBytes(len)),
                        _ => Err(()),
                    }
                } else {
                    Err(())
                }
            }
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::FixedArray(inner, size) => write!(f, "{inner}[{size}]"),
        }
    }
}

/// A function parameter: its type and, when known, its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: ParamType,
    pub name: Option<String>,
    position: usize,
}

impl Param {
    /// Parses `uint256` or `uint256 amount` as the parameter at `position`.
    pub fn parse(text: &str, position: usize) -> Result<Self, EncodeError> {
        let mut parts = text.split_whitespace();
        let ty = parts.next().unwrap_or_default();
        let name = parts.last().map(str::to_string);
        let label = name.clone().unwrap_or_else(|| format!("#{position}"));
        let ty = ty.parse().map_err(|_| EncodeError::UnsupportedType {
            param: label,
            ty: ty.to_string(),
        })?;
        Ok(Self { ty, name, position })
    }

    /// The parameter name, or its position when unnamed.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.position))
    }
}

// ENCODED CALL
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedCall {
    pub contract: String,
    pub function: String,
    pub signature: String,
    pub selector: String,
    pub calldata: String,
    pub calldata_hash: String,
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hash = [0u8; WORD];
    hash.copy_from_slice(&Keccak256::digest(data));
    hash
}

/// The first four bytes of the hash of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encodes a call of `function` on `contract`.
///
/// `types` holds one entry per parameter, either a bare type or a type followed by the
/// parameter name. `args` are the textual arguments: booleans are `true` or `false`, integers are
/// decimal or `0x` hexadecimal, byte strings are `0x` hexadecimal and arrays are JSON arrays.
pub fn encode_call(
    contract: &str,
    function: &str,
    types: &[String],
    args: &[String],
) -> Result<EncodedCall, EncodeError> {
    if !Address::is_valid(contract) {
        return Err(EncodeError::InvalidContract(contract.to_string()));
    }
    let valid_name = function
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && function.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !valid_name {
        return Err(EncodeError::InvalidFunction(function.to_string()));
    }

    let params = types
        .iter()
        .enumerate()
        .map(|(position, text)| Param::parse(text, position))
        .collect::<Result<Vec<_>, _>>()?;
    if params.len() != args.len() {
        return Err(EncodeError::ArgumentCount {
            expected: params.len(),
            actual: args.len(),
        });
    }

    let canonical: Vec<String> = params.iter().map(|p| p.ty.to_string()).collect();
    let signature = format!("{function}({})", canonical.join(","));

    let tokens = params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            top_level(&param.ty, arg)
                .and_then(|value| tokenize(&param.ty, &value))
                .map_err(|reason| EncodeError::InvalidArgument {
                    param: param.label(),
                    reason,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut calldata = selector(&signature).to_vec();
    calldata.extend(encode_tokens(&tokens));
    let hash = keccak256(&calldata);

    log::debug!("encoded {signature} into {} bytes", calldata.len());
    Ok(EncodedCall {
        contract: contract.to_string(),
        function: function.to_string(),
        selector: format!("0x{}", hex::encode(&calldata[..4])),
        signature,
        calldata: format!("0x{}", hex::encode(&calldata)),
        calldata_hash: format!("0x{}", hex::encode(hash)),
    })
}

// ARGUMENT COERCION
// ================================================================================================

/// An argument after coercion, ready to be laid out.
#[derive(Debug)]
enum Token {
    Word(Word),
    /// Length-prefixed, padded bytes.
    Bytes(Vec<u8>),
    /// Length-prefixed sequence.
    Array(Vec<Token>),
    /// Fixed-size sequence, laid out in place unless an element is dynamic.
    Tuple(Vec<Token>),
}

/// Arrays are supplied as JSON; every other argument is taken literally.
fn top_level(ty: &ParamType, arg: &str) -> Result<Value, String> {
    if ty.is_array() {
        match serde_json::from_str(arg) {
            Ok(value @ Value::Array(_)) => Ok(value),
            _ => Err(format!("expected a JSON array, got `{arg}`")),
        }
    } else {
        Ok(Value::String(arg.to_string()))
    }
}

fn scalar(value: &Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(format!("expected a scalar value, got {other}")),
    }
}

fn tokenize(ty: &ParamType, value: &Value) -> Result<Token, String> {
    match ty {
        ParamType::Array(inner) => {
            let items = elements(value)?;
            Ok(Token::Array(
                items.iter().map(|item| tokenize(inner, item)).collect::<Result<_, _>>()?,
            ))
        }
        ParamType::FixedArray(inner, size) => {
            let items = elements(value)?;
            if items.len() != *size {
                return Err(format!("expected {size} element(s), got {}", items.len()));
            }
            Ok(Token::Tuple(
                items.iter().map(|item| tokenize(inner, item)).collect::<Result<_, _>>()?,
            ))
        }
        ParamType::String => match value {
            Value::String(text) => Ok(Token::Bytes(text.as_bytes().to_vec())),
            other => Err(format!("expected a string, got {other}")),
        },
        ParamType::Bytes => Ok(Token::Bytes(hex_bytes(&scalar(value)?)?)),
        ParamType::FixedBytes(len) => {
            let bytes = hex_bytes(&scalar(value)?)?;
            if bytes.len() != *len {
                return Err(format!("expected {len} byte(s), got {}", bytes.len()));
            }
            let mut word = [0u8; WORD];
            word[..bytes.len()].copy_from_slice(&bytes);
            Ok(Token::Word(word))
        }
        ParamType::Address => {
            let text = scalar(value)?;
            if !Address::is_valid(&text) {
                return Err(format!("`{text}` is not a valid address"));
            }
            let mut word = [0u8; WORD];
            hex::decode_to_slice(&text[2..], &mut word[12..]).map_err(|err| err.to_string())?;
            Ok(Token::Word(word))
        }
        ParamType::Bool => match scalar(value)?.as_str() {
            "true" => Ok(Token::Word(word_from_usize(1))),
            "false" => Ok(Token::Word(word_from_usize(0))),
            other => Err(format!("expected `true` or `false`, got `{other}`")),
        },
        ParamType::Uint(bits) => {
            let text = scalar(value)?;
            let word = parse_magnitude(&text)?;
            let skip = WORD - bits / 8;
            if word[..skip].iter().any(|byte| *byte != 0) {
                return Err(format!("{text} does not fit in uint{bits}"));
            }
            Ok(Token::Word(word))
        }
        ParamType::Int(bits) => {
            let text = scalar(value)?;
            let (negative, digits) = match text.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, text.as_str()),
            };
            let magnitude = parse_magnitude(digits)?;
            let negative = negative && magnitude.iter().any(|byte| *byte != 0);
            let word = if negative { negate(magnitude) } else { magnitude };

            let fill = if negative { 0xff } else { 0x00 };
            let skip = WORD - bits / 8;
            let fits = word[..skip].iter().all(|byte| *byte == fill)
                && (word[skip] & 0x80 != 0) == negative;
            if !fits {
                return Err(format!("{text} does not fit in int{bits}"));
            }
            Ok(Token::Word(word))
        }
    }
}

fn elements(value: &Value) -> Result<&Vec<Value>, String> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(format!("expected an array, got {other}")),
    }
}

fn hex_bytes(text: &str) -> Result<Vec<u8>, String> {
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| format!("`{text}` is not 0x-prefixed hex"))?;
    hex::decode(digits).map_err(|err| format!("`{text}` is not valid hex: {err}"))
}

/// Parses a non-negative decimal or `0x` hexadecimal integer into a big-endian word.
fn parse_magnitude(text: &str) -> Result<Word, String> {
    let mut word = [0u8; WORD];
    if let Some(digits) = text.strip_prefix("0x") {
        if digits.is_empty() || digits.len() > 2 * WORD {
            return Err(format!("`{text}` is not a 256-bit hex integer"));
        }
        let padded = format!("{digits:0>64}");
        hex::decode_to_slice(padded, &mut word).map_err(|err| format!("`{text}`: {err}"))?;
        return Ok(word);
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("`{text}` is not an integer"));
    }
    for digit in text.bytes() {
        let mut carry = u16::from(digit - b'0');
        for byte in word.iter_mut().rev() {
            let value = u16::from(*byte) * 10 + carry;
            *byte = (value & 0xff) as u8;
            carry = value >> 8;
        }
        if carry != 0 {
            return Err(format!("`{text}` exceeds 256 bits"));
        }
    }
    Ok(word)
}

/// Two's complement negation.
fn negate(mut word: Word) -> Word {
    let mut carry = 1u16;
    for byte in word.iter_mut().rev() {
        let value = u16::from(!*byte) + carry;
        *byte = (value & 0xff) as u8;
        carry = value >> 8;
    }
    word
}

fn word_from_usize(value: usize) -> Word {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

// LAYOUT
// ================================================================================================

impl Token {
    fn is_dynamic(&self) -> bool {
        match self {
            Self::Word(_) => false,
            Self::Bytes(_) | Self::Array(_) => true,
            Self::Tuple(items) => items.iter().any(Token::is_dynamic),
        }
    }

    /// Size of the token when laid out in place.
    fn head_size(&self) -> usize {
        match self {
            Self::Tuple(items) if !self.is_dynamic() => items.iter().map(Token::head_size).sum(),
            _ => WORD,
        }
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            Self::Word(word) => word.to_vec(),
            Self::Bytes(bytes) => {
                let mut out = word_from_usize(bytes.len()).to_vec();
                out.extend_from_slice(bytes);
                out.resize(WORD + bytes.len().div_ceil(WORD) * WORD, 0);
                out
            }
            Self::Array(items) => {
                let mut out = word_from_usize(items.len()).to_vec();
                out.extend(encode_tokens(items));
                out
            }
            Self::Tuple(items) => encode_tokens(items),
        }
    }
}

/// Lays out a sequence: static tokens in place, dynamic tokens as offsets into a trailing tail.
fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_size: usize = tokens.iter().map(Token::head_size).sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            head.extend(word_from_usize(head_size + tail.len()));
            tail.extend(token.encode());
        } else {
            head.extend(token.encode());
        }
    }
    head.extend(tail);
    head
}
