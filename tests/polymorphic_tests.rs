// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! End-to-end tests for open polymorphic supertype decoding.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use flexjson::{
    DecodeError, Decoder, FromJson, Json, JsonCodec, JsonNumber, JsonObject, Result,
    ResolverRegistry, SubtypeDirectory, Supertype, ToJson, Variant,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Animal {
    Cheetah { name: String, aggressiveness: f64 },
    Bunny { name: String, cuteness: f64 },
}

impl Supertype for Animal {
    type Discriminant = String;

    fn name() -> &'static str {
        "Animal"
    }

    fn decode_discriminant(decoder: &Decoder<'_>) -> Result<String> {
        decoder.keyed()?.decode("kind")
    }
}

impl FromJson for Animal {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.resolve()
    }
}

fn decode_cheetah(decoder: &Decoder<'_>) -> Result<Animal> {
    let keyed = decoder.keyed()?;
    Ok(Animal::Cheetah {
        name: keyed.decode("name")?,
        aggressiveness: keyed.decode("aggressiveness")?,
    })
}

fn decode_bunny(decoder: &Decoder<'_>) -> Result<Animal> {
    let keyed = decoder.keyed()?;
    Ok(Animal::Bunny {
        name: keyed.decode("name")?,
        cuteness: keyed.decode("cuteness")?,
    })
}

struct Ark {
    animals: Vec<Animal>,
}

impl FromJson for Ark {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(Ark {
            animals: decoder.keyed()?.decode("animals")?,
        })
    }
}

impl ToJson for Animal {
    fn to_json(&self) -> Result<Json> {
        let mut entries = JsonObject::new();
        match self {
            Animal::Cheetah {
                name,
                aggressiveness,
            } => {
                entries.insert("kind".to_owned(), Json::from("cheetah"));
                entries.insert("name".to_owned(), name.to_json()?);
                entries.insert(
                    "aggressiveness".to_owned(),
                    Json::Number(JsonNumber::Double(*aggressiveness)),
                );
            }
            Animal::Bunny { name, cuteness } => {
                entries.insert("kind".to_owned(), Json::from("bunny"));
                entries.insert("name".to_owned(), name.to_json()?);
                entries.insert(
                    "cuteness".to_owned(),
                    Json::Number(JsonNumber::Double(*cuteness)),
                );
            }
        }
        Ok(Json::Object(entries))
    }
}

impl ToJson for Ark {
    fn to_json(&self) -> Result<Json> {
        let mut entries = JsonObject::new();
        entries.insert("animals".to_owned(), self.animals.to_json()?);
        Ok(Json::Object(entries))
    }
}

fn animal_codec() -> JsonCodec {
    let codec = JsonCodec::new();
    let directory = codec.registry().directory();
    directory
        .register(Variant::<Animal>::new("cheetah".to_owned(), decode_cheetah))
        .unwrap();
    directory
        .register(Variant::<Animal>::new("bunny".to_owned(), decode_bunny))
        .unwrap();
    codec
}

const ARK: &str = r#"{
    "animals": [
        {"kind": "cheetah", "name": "Chet", "aggressiveness": 0.5},
        {"kind": "bunny", "name": "Hops", "cuteness": 0.8},
        {"kind": "cheetah", "name": "Dash", "aggressiveness": 1.0}
    ]
}"#;

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_ark_decodes_heterogeneous_animals() {
    let codec = animal_codec();
    let ark: Ark = codec.decode(ARK).unwrap();

    assert_eq!(ark.animals.len(), 3);
    assert_eq!(
        ark.animals[0],
        Animal::Cheetah {
            name: "Chet".to_owned(),
            aggressiveness: 0.5
        }
    );
    assert_eq!(
        ark.animals[1],
        Animal::Bunny {
            name: "Hops".to_owned(),
            cuteness: 0.8
        }
    );
    assert_eq!(
        ark.animals[2],
        Animal::Cheetah {
            name: "Dash".to_owned(),
            aggressiveness: 1.0
        }
    );
}

#[test]
fn test_ark_survives_encode_decode_round_trip() {
    let codec = animal_codec();
    let ark = Ark {
        animals: vec![
            Animal::Cheetah {
                name: "Chet".to_owned(),
                aggressiveness: 0.5,
            },
            Animal::Bunny {
                name: "Hops".to_owned(),
                cuteness: 0.8,
            },
            Animal::Cheetah {
                name: "Dash".to_owned(),
                aggressiveness: 1.0,
            },
        ],
    };

    let encoded = codec.encode(&ark).unwrap();
    let decoded: Ark = codec.decode(&encoded).unwrap();

    // Order, concrete variants, and field values all survive.
    assert_eq!(decoded.animals, ark.animals);
}

#[test]
fn test_unknown_discriminant_without_fallback_fails() {
    let codec = animal_codec();
    let err = codec
        .decode::<Animal>(r#"{"kind": "dragon", "name": "Smaug"}"#)
        .unwrap_err();
    match err {
        DecodeError::NoFallbackCovariant {
            supertype,
            discriminant,
        } => {
            assert_eq!(supertype, "Animal");
            assert!(discriminant.contains("dragon"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_discriminant_key_fails() {
    let codec = animal_codec();
    let err = codec
        .decode::<Animal>(r#"{"name": "Anon"}"#)
        .unwrap_err();
    assert!(matches!(err, DecodeError::KeyNotFound { .. }));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let codec = animal_codec();
    let err = codec
        .registry()
        .directory()
        .register(Variant::<Animal>::new("cheetah".to_owned(), decode_bunny))
        .unwrap_err();
    assert!(matches!(err, DecodeError::Registry { .. }));
}

// ============================================================================
// Fallback
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Started { at: i64 },
    Unrecognized { kind: String },
}

impl Supertype for Event {
    type Discriminant = String;

    fn name() -> &'static str {
        "Event"
    }

    fn decode_discriminant(decoder: &Decoder<'_>) -> Result<String> {
        decoder.keyed()?.decode("kind")
    }

    fn fallback(_id: &String) -> Option<Variant<Self>> {
        Some(Variant::new("<fallback>".to_owned(), decode_unrecognized))
    }
}

impl FromJson for Event {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.resolve()
    }
}

fn decode_started(decoder: &Decoder<'_>) -> Result<Event> {
    decoder.keyed()?.decode("at").map(|at| Event::Started { at })
}

fn decode_unrecognized(decoder: &Decoder<'_>) -> Result<Event> {
    decoder
        .keyed()?
        .decode("kind")
        .map(|kind| Event::Unrecognized { kind })
}

#[test]
fn test_fallback_catches_unknown_discriminants() {
    let codec = JsonCodec::new();
    codec
        .registry()
        .directory()
        .register(Variant::<Event>::new("started".to_owned(), decode_started))
        .unwrap();

    let known: Event = codec.decode(r#"{"kind": "started", "at": 5}"#).unwrap();
    assert_eq!(known, Event::Started { at: 5 });

    let unknown: Event = codec.decode(r#"{"kind": "meteor", "at": 9}"#).unwrap();
    assert_eq!(
        unknown,
        Event::Unrecognized {
            kind: "meteor".to_owned()
        }
    );
}

// ============================================================================
// Static candidates
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Move { x: i64 },
    Stop,
}

impl Supertype for Command {
    type Discriminant = String;

    fn name() -> &'static str {
        "Command"
    }

    fn decode_discriminant(decoder: &Decoder<'_>) -> Result<String> {
        decoder.keyed()?.decode("op")
    }

    // Closed set: declared inline, never registered in a directory.
    fn candidates(_directory: &SubtypeDirectory) -> Vec<Variant<Self>> {
        vec![
            Variant::new("move".to_owned(), |d: &Decoder<'_>| {
                d.keyed()?.decode("x").map(|x| Command::Move { x })
            }),
            Variant::new("stop".to_owned(), |_: &Decoder<'_>| Ok(Command::Stop)),
        ]
    }
}

impl FromJson for Command {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.resolve()
    }
}

#[test]
fn test_static_candidate_set_needs_no_registration() {
    let codec = JsonCodec::new();
    let moved: Command = codec.decode(r#"{"op": "move", "x": 4}"#).unwrap();
    assert_eq!(moved, Command::Move { x: 4 });

    let stopped: Command = codec.decode(r#"{"op": "stop"}"#).unwrap();
    assert_eq!(stopped, Command::Stop);

    let err = codec.decode::<Command>(r#"{"op": "fly"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::NoFallbackCovariant { .. }));
}

// ============================================================================
// Candidate caching
// ============================================================================

static ROBOT_QUERIES: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq)]
enum Robot {
    Arm { joints: i64 },
}

impl Supertype for Robot {
    type Discriminant = String;

    fn decode_discriminant(decoder: &Decoder<'_>) -> Result<String> {
        decoder.keyed()?.decode("kind")
    }

    fn candidates(directory: &SubtypeDirectory) -> Vec<Variant<Self>> {
        ROBOT_QUERIES.fetch_add(1, Ordering::SeqCst);
        directory.variants::<Self>()
    }
}

impl FromJson for Robot {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.resolve()
    }
}

fn decode_arm(decoder: &Decoder<'_>) -> Result<Robot> {
    decoder
        .keyed()?
        .decode("joints")
        .map(|joints| Robot::Arm { joints })
}

#[test]
fn test_resolution_is_cached_per_discriminant() {
    let codec = JsonCodec::new();
    codec
        .registry()
        .directory()
        .register(Variant::<Robot>::new("arm".to_owned(), decode_arm))
        .unwrap();

    let payload = r#"{"kind": "arm", "joints": 6}"#;
    let first: Robot = codec.decode(payload).unwrap();
    let queries_after_first = ROBOT_QUERIES.load(Ordering::SeqCst);
    let second: Robot = codec.decode(payload).unwrap();

    assert_eq!(first, second);
    // The second decode hits the discriminant cache, never the candidates.
    assert_eq!(ROBOT_QUERIES.load(Ordering::SeqCst), queries_after_first);
}

static GHOST_QUERIES: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq)]
enum Ghost {}

impl Supertype for Ghost {
    type Discriminant = String;

    fn decode_discriminant(decoder: &Decoder<'_>) -> Result<String> {
        decoder.keyed()?.decode("kind")
    }

    fn candidates(_directory: &SubtypeDirectory) -> Vec<Variant<Self>> {
        GHOST_QUERIES.fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }
}

impl FromJson for Ghost {
    fn from_json(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.resolve()
    }
}

#[test]
fn test_empty_candidate_set_is_requeried_exactly_once() {
    let codec = JsonCodec::new();
    let err = codec.decode::<Ghost>(r#"{"kind": "boo"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::NoFallbackCovariant { .. }));
    assert_eq!(GHOST_QUERIES.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Shared registry
// ============================================================================

#[test]
fn test_concurrent_decodes_share_one_registry() {
    let registry = Arc::new(ResolverRegistry::new());
    registry
        .directory()
        .register(Variant::<Animal>::new("cheetah".to_owned(), decode_cheetah))
        .unwrap();
    registry
        .directory()
        .register(Variant::<Animal>::new("bunny".to_owned(), decode_bunny))
        .unwrap();
    let codec = JsonCodec::with_registry(registry);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let codec = codec.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    let ark: Ark = codec.decode(ARK).unwrap();
                    assert_eq!(ark.animals.len(), 3);
                }
            });
        }
    });
}

#[test]
fn test_prewarm_resolves_every_registered_covariant() {
    let codec = animal_codec();
    assert_eq!(codec.registry().prewarm::<Animal>().unwrap(), 2);

    let ark: Ark = codec.decode(ARK).unwrap();
    assert_eq!(ark.animals.len(), 3);
}
