#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;

use cartograph::{
    BasicDecodable, BasicEncodable, BasicInMapper, BasicOutMapper, Decode, DecodeError, Encode,
    EncodeError, InMap, InMapping, MappingIndex, OutMap, OutMapping, PlainOutMapper, SetError,
    Value,
};
use common::FlatMap;
use quickcheck_macros::quickcheck;
use rstest::rstest;
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
struct Tagged {
    name: String,
    tags: Vec<String>,
}

impl BasicDecodable for Tagged {
    fn from_basic_mapper<S: InMap>(m: &BasicInMapper<'_, S>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: m.read(&["name"])?,
            tags: m.read_array(&["tags"])?,
        })
    }
}

impl BasicEncodable for Tagged {
    fn to_basic_mapper<D: OutMap>(&self, m: &mut BasicOutMapper<D>) -> Result<(), EncodeError> {
        m.write(&self.name, &["name"])?;
        m.write_array(&self.tags, &["tags"])
    }
}

fn record(entries: &[(&str, FlatMap)]) -> FlatMap {
    FlatMap::Record(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    )
}

#[test]
fn backend_without_arrays_rejects_array_writes() {
    let tagged = Tagged {
        name: "crate".into(),
        tags: vec!["no_std".into()],
    };
    assert_eq!(
        tagged.encode::<FlatMap>(),
        Err(EncodeError::CannotRepresentArray)
    );
    // The same value is fine where arrays exist.
    assert!(tagged.encode::<Value>().is_ok());
}

#[test]
fn backend_without_arrays_rejects_array_reads() {
    let source = record(&[
        ("name", FlatMap::Text("crate".into())),
        ("tags", FlatMap::Text("no_std".into())),
    ]);
    assert_eq!(
        Tagged::decode(&source),
        Err(DecodeError::CannotRepresentAsArray)
    );
}

#[test]
fn unrepresentable_scalars_name_their_type() {
    assert_eq!(
        0.5_f64.encode::<FlatMap>(),
        Err(EncodeError::WrongType { expected: "f64" })
    );
    let mut mapper = BasicOutMapper::<FlatMap>::new();
    assert_eq!(
        mapper.write_scalar(true, &["flag"]),
        Err(EncodeError::WrongType { expected: "bool" })
    );
    // Nothing was written by the failed call.
    assert_eq!(mapper.into_destination(), FlatMap::blank());
}

#[rstest]
#[case(&["a", "b"])]
#[case(&["a", "b", "c"])]
#[case(&["nest", "int", "0", "x"])]
fn deep_writes_are_rejected(#[case] path: &[&'static str]) {
    let mut mapper = BasicOutMapper::<Value>::new();
    assert_eq!(
        mapper.write(&1_i32, path),
        Err(EncodeError::CannotSet(SetError::DeepSetUnsupported {
            depth: path.len()
        }))
    );
    assert_eq!(mapper.destination(), &Value::blank());
}

#[quickcheck]
fn deep_set_always_fails(segments: Vec<String>) -> bool {
    let path: Vec<MappingIndex> = segments.into_iter().map(MappingIndex::from).collect();
    let mut destination = json!({});
    let result = destination.set_path(Some(json!(1)), &path);
    match path.len() {
        0 => result.is_ok() && destination == json!(1),
        1 => result.is_ok(),
        depth => result == Err(SetError::DeepSetUnsupported { depth }) && destination == json!({}),
    }
}

#[test]
fn absent_optional_leaves_the_field_alone() {
    let mut mapper = BasicOutMapper::of(json!({"kept": 1}));
    mapper.write_optional::<i32>(None, &["kept"]).unwrap();
    mapper.write_optional::<i32>(None, &["missing"]).unwrap();
    assert_eq!(mapper.into_destination(), json!({"kept": 1}));
}

#[test]
fn absent_optional_at_the_root_resets_to_blank() {
    let mut mapper = PlainOutMapper::of(json!({"stale": true}));
    mapper.write_optional::<i32>(None, &[]).unwrap();
    assert_eq!(mapper.into_destination(), json!({}));
}

#[test]
fn root_write_replaces_the_destination() {
    let mut mapper = PlainOutMapper::of(Value::Boolean(false));
    mapper.write("whole", &[]).unwrap();
    assert_eq!(mapper.into_destination(), Value::String("whole".into()));
}

#[test]
fn empty_path_reads_the_source_itself() {
    let source = json!({"int": 15});
    assert_eq!(source.get_path(&[]), Some(&source));
    let whole: i32 = BasicInMapper::new(&json!(7)).read(&[]).unwrap();
    assert_eq!(whole, 7);
}

#[test]
fn missing_segments_short_circuit() {
    let source = json!({"nest": {"int": 11}});
    let path = [MappingIndex::new("nest"), MappingIndex::new("nope"), MappingIndex::new("int")];
    assert_eq!(source.get_path(&path), None);
    let err = BasicInMapper::new(&source).read::<i32>(&["nest", "nope"]).unwrap_err();
    assert_eq!(err.to_string(), "no value at path $.nest.nope");
}
