use field_projection::{ProjectionEngine, WhitelistSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

/// Field name for slot `index`; documents and whitelists draw from the same
/// pool so that patterns actually hit.
pub fn field_name(index: usize) -> String {
    format!("f{index}")
}

/// Builds a random record nested up to `depth` levels with `width` fields per
/// level. Values mix scalars, nested records and arrays of records.
pub fn random_document<R: Rng>(rng: &mut R, depth: usize, width: usize) -> Value {
    let mut map = Map::new();

    if rng.gen_bool(0.5) {
        map.insert("_id".to_string(), json!(rng.gen::<u32>()));
    }

    for index in 0..width {
        map.insert(field_name(index), random_value(rng, depth, width));
    }

    Value::Object(map)
}

fn random_value<R: Rng>(rng: &mut R, depth: usize, width: usize) -> Value {
    let roll = if depth == 0 {
        rng.gen_range(0..4)
    } else {
        rng.gen_range(0..7)
    };

    match roll {
        0 => json!(rng.gen_range(-1000..1000)),
        1 => json!(format!("s{}", rng.gen::<u16>())),
        2 => json!(rng.gen_bool(0.5)),
        3 => Value::Null,
        4 | 5 => random_document(rng, depth - 1, width),
        _ => {
            let len = rng.gen_range(0..4);
            let items = (0..len)
                .map(|_| {
                    if rng.gen_bool(0.8) {
                        random_document(rng, depth - 1, width)
                    } else {
                        json!([rng.gen_range(0..10)])
                    }
                })
                .collect();
            Value::Array(items)
        }
    }
}

/// Builds a comma separated field list of `count` random patterns over the
/// same field pool as [`random_document`].
pub fn random_field_list<R: Rng>(rng: &mut R, depth: usize, width: usize, count: usize) -> String {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..=depth + 1);
            let mut segments: Vec<String> = (0..len)
                .map(|_| {
                    if rng.gen_bool(0.25) {
                        "*".to_string()
                    } else {
                        field_name(rng.gen_range(0..width))
                    }
                })
                .collect();
            if rng.gen_bool(0.15) {
                segments.push("**".to_string());
            }
            segments.join(".")
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub struct ProjectionFixture {
    pub engine: ProjectionEngine,
    pub documents: Vec<Value>,
}

impl ProjectionFixture {
    /// Creates `count` documents from a seeded generator, projected with
    /// the whitelist parsed from `fields`.
    pub fn new(fields: &str, count: usize, depth: usize, width: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let documents = (0..count)
            .map(|_| random_document(&mut rng, depth, width))
            .collect();

        Self {
            engine: ProjectionEngine::new(WhitelistSet::from_field_list(fields)),
            documents,
        }
    }
}
