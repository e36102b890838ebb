#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use cartograph::{
    BasicDecodable, BasicEncodable, BasicInMapper, BasicOutMapper, Decode, DecodeError, Encode,
    EncodeError, InMap, InMapping, OutMap, OutMapping,
};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// Every field is optional so that most generated objects decode.
#[derive(Debug, Clone, PartialEq)]
struct Probe {
    name: Option<String>,
    count: Option<i64>,
    ratio: Option<f64>,
    flag: Option<bool>,
    child: Option<Box<Probe>>,
}

impl BasicDecodable for Probe {
    fn from_basic_mapper<S: InMap>(m: &BasicInMapper<'_, S>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: m.read_optional(&["name"])?,
            count: m.read_optional(&["count"])?,
            ratio: m.read_optional(&["ratio"])?,
            flag: m.read_optional(&["flag"])?,
            child: m.read_optional::<Probe>(&["child"])?.map(Box::new),
        })
    }
}

impl BasicEncodable for Probe {
    fn to_basic_mapper<D: OutMap>(&self, m: &mut BasicOutMapper<D>) -> Result<(), EncodeError> {
        m.write_optional(self.name.as_ref(), &["name"])?;
        m.write_optional(self.count.as_ref(), &["count"])?;
        m.write_optional(self.ratio.as_ref(), &["ratio"])?;
        m.write_optional(self.flag.as_ref(), &["flag"])?;
        m.write_optional(self.child.as_deref(), &["child"])
    }
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(24)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(u.arbitrary::<i64>()?.into()),
            4 => Value::Number(u.arbitrary::<u64>()?.into()),
            5..=10 => Value::String(u.arbitrary()?),
            11..=14 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            15..=18 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            // Objects keyed like `Probe` so decoding gets past the first field.
            19..=23 => {
                const KEYS: [&str; 5] = ["name", "count", "ratio", "flag", "child"];
                let m: Vec<(u8, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| {
                    (KEYS[usize::from(k) % KEYS.len()].to_owned(), v.0)
                })))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn roundtrip(data: &[u8]) {
    let Ok(ArbitraryValue(json)) = ArbitraryValue::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    let value = cartograph::Value::from(json.clone());

    // Both backends accept and reject the same inputs.
    let from_json = Probe::decode(&json);
    let from_value = Probe::decode(&value);
    assert_eq!(from_json.is_ok(), from_value.is_ok(), "{json}");

    let Ok(probe) = from_json else {
        return;
    };
    assert_eq!(from_value.as_ref(), Ok(&probe));

    let encoded: Value = probe.encode().expect("encoding a decoded probe");
    assert_eq!(Probe::decode(&encoded).as_ref(), Ok(&probe));
    let encoded: cartograph::Value = probe.encode().expect("encoding a decoded probe");
    assert_eq!(Probe::decode(&encoded).as_ref(), Ok(&probe));
}

fuzz_target!(|data: &[u8]| roundtrip(data));
