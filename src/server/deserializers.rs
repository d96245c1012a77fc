use serde::{de, Deserialize, Deserializer};

// legacy clients send ids and difficulty both as numbers and as numeric strings,
// and sometimes a number as the answer text
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

pub fn deserialize_option_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(v)) => Ok(Some(v)),
        Some(Scalar::Text(value)) => match value.trim().parse::<i64>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(de::Error::custom(format!(
                "Wrong value {value}, can not parse to i64"
            ))),
        },
    }
}

pub fn deserialize_option_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Int(v) => v.to_string(),
        Scalar::Text(v) => v,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_option_int")]
        category: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_option_text")]
        answer: Option<String>,
    }

    fn parse(json: &str) -> serde_json::Result<Body> {
        serde_json::from_str(json)
    }

    #[test]
    fn ints_accept_numeric_strings() {
        assert_eq!(parse(r#"{"category": 3}"#).unwrap().category, Some(3));
        assert_eq!(parse(r#"{"category": "3"}"#).unwrap().category, Some(3));
        assert_eq!(parse(r#"{"category": null}"#).unwrap().category, None);
        assert_eq!(parse(r#"{}"#).unwrap().category, None);
    }

    #[test]
    fn ints_reject_other_values() {
        assert!(parse(r#"{"category": "three"}"#).is_err());
        assert!(parse(r#"{"category": 2.5}"#).is_err());
        assert!(parse(r#"{"category": [1]}"#).is_err());
    }

    #[test]
    fn text_accepts_numbers() {
        assert_eq!(parse(r#"{"answer": 4}"#).unwrap().answer.as_deref(), Some("4"));
        assert_eq!(
            parse(r#"{"answer": "Agra"}"#).unwrap().answer.as_deref(),
            Some("Agra")
        );
        assert!(parse(r#"{"answer": true}"#).is_err());
    }
}
