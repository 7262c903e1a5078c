//! Convert raw parsed scenario JSON into a [`Scenario`].
//!
//! Accepts the shapes models and older clients actually send: consequences as
//! bare strings or as `{shortTerm, longTerm?}` objects, keyed `"0".."2"` (or
//! as a three-element array). Anything that cannot yield three options with
//! three consequences is a `MalformedScenario`.

use serde_json::{Map, Value};

use fincoach_domain::{Consequence, DomainError, Scenario, CONSEQUENCE_KEYS, OPTION_COUNT};

/// Normalize one scenario object.
///
/// `title`, `description` and `learningTip` must be strings; empty strings
/// are fine and text length is never checked. Object consequences keep only
/// `shortTerm` and `longTerm`.
pub fn normalize_scenario(raw: &Value) -> Result<Scenario, DomainError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| DomainError::malformed_scenario("scenario is not a JSON object"))?;

    let title = required_string(obj, "title")?;
    let description = required_string(obj, "description")?;
    let learning_tip = required_string(obj, "learningTip")?;
    let options = normalize_options(obj.get("options"))?;
    let consequences = normalize_consequences(obj.get("consequences"))?;

    Ok(Scenario {
        title,
        description,
        options,
        consequences,
        learning_tip,
    })
}

fn required_string(obj: &Map<String, Value>, field: &str) -> Result<String, DomainError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DomainError::malformed_scenario(format!("`{}` must be a string", field))),
        None => Err(DomainError::malformed_scenario(format!("missing `{}`", field))),
    }
}

fn normalize_options(value: Option<&Value>) -> Result<[String; OPTION_COUNT], DomainError> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| DomainError::malformed_scenario("`options` must be an array"))?;

    if items.len() != OPTION_COUNT {
        return Err(DomainError::malformed_scenario(format!(
            "expected {} options, got {}",
            OPTION_COUNT,
            items.len()
        )));
    }

    let mut options: [String; OPTION_COUNT] = Default::default();
    for (slot, item) in options.iter_mut().zip(items) {
        *slot = item
            .as_str()
            .ok_or_else(|| DomainError::malformed_scenario("every option must be a string"))?
            .to_string();
    }
    Ok(options)
}

fn normalize_consequences(
    value: Option<&Value>,
) -> Result<[Consequence; OPTION_COUNT], DomainError> {
    let value =
        value.ok_or_else(|| DomainError::malformed_scenario("missing `consequences`"))?;

    let mut consequences: [Consequence; OPTION_COUNT] =
        std::array::from_fn(|_| Consequence::from_text(""));

    for (i, key) in CONSEQUENCE_KEYS.iter().enumerate() {
        let entry = match value {
            Value::Object(map) => map.get(*key),
            Value::Array(items) => items.get(i),
            _ => {
                return Err(DomainError::malformed_scenario(
                    "`consequences` must be an object keyed \"0\"..\"2\"",
                ))
            }
        };
        let entry = entry.ok_or_else(|| {
            DomainError::malformed_scenario(format!("missing consequence \"{}\"", key))
        })?;
        consequences[i] = normalize_consequence(key, entry)?;
    }

    Ok(consequences)
}

fn normalize_consequence(key: &str, value: &Value) -> Result<Consequence, DomainError> {
    match value {
        Value::String(text) => Ok(Consequence::from_text(text.clone())),
        Value::Object(obj) => {
            let short_term = match obj.get("shortTerm") {
                Some(Value::String(s)) => s.clone(),
                _ => {
                    return Err(DomainError::malformed_scenario(format!(
                        "consequence \"{}\" has no string `shortTerm`",
                        key
                    )))
                }
            };
            let long_term = match obj.get("longTerm") {
                Some(Value::String(s)) => s.clone(),
                None | Some(Value::Null) => String::new(),
                Some(_) => {
                    return Err(DomainError::malformed_scenario(format!(
                        "consequence \"{}\" has a non-string `longTerm`",
                        key
                    )))
                }
            };
            Ok(Consequence::new(short_term, long_term))
        }
        _ => Err(DomainError::malformed_scenario(format!(
            "consequence \"{}\" must be a string or an object",
            key
        ))),
    }
}
