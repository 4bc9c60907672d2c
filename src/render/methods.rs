//! Method-call extensions for the template engine
//!
//! The engine resolves unknown method calls through this callback. Sequences
//! get queryset-style accessors (`cable.a_terminations.first()`), and strings
//! get `format(...)` for zero-padded identifiers.

use minijinja::value::{Value, ValueKind};
use minijinja::{Error, ErrorKind, State};

use super::format;

pub fn call_unknown_method(
    _state: &State,
    value: &Value,
    method: &str,
    args: &[Value],
) -> Result<Value, Error> {
    match value.kind() {
        ValueKind::Seq => seq_method(value, method, args),
        ValueKind::String => str_method(value, method, args),
        _ => Err(Error::from(ErrorKind::UnknownMethod)),
    }
}

fn seq_method(value: &Value, method: &str, args: &[Value]) -> Result<Value, Error> {
    if !args.is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("{method}() takes no arguments"),
        ));
    }
    let mut iter = value.try_iter()?;
    Ok(match method {
        // first() on an empty relationship yields none, like an empty queryset
        "first" => iter.next().unwrap_or_else(|| Value::from(())),
        "last" => iter.last().unwrap_or_else(|| Value::from(())),
        "count" => Value::from(iter.count()),
        "exists" => Value::from(iter.next().is_some()),
        _ => return Err(Error::from(ErrorKind::UnknownMethod)),
    })
}

fn str_method(value: &Value, method: &str, args: &[Value]) -> Result<Value, Error> {
    let s = value
        .as_str()
        .ok_or_else(|| Error::from(ErrorKind::UnknownMethod))?;
    match method {
        "format" => format::format_str(s, args).map(Value::from),
        _ => Err(Error::from(ErrorKind::UnknownMethod)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[i64]) -> Value {
        Value::from(values.to_vec())
    }

    #[test]
    fn first_and_last() {
        let v = seq(&[10, 20, 30]);
        assert_eq!(seq_method(&v, "first", &[]).unwrap(), Value::from(10));
        assert_eq!(seq_method(&v, "last", &[]).unwrap(), Value::from(30));
    }

    #[test]
    fn first_on_empty_is_none() {
        let v = seq(&[]);
        assert!(seq_method(&v, "first", &[]).unwrap().is_none());
    }

    #[test]
    fn count_and_exists() {
        let v = seq(&[1, 2]);
        assert_eq!(seq_method(&v, "count", &[]).unwrap(), Value::from(2));
        assert_eq!(seq_method(&v, "exists", &[]).unwrap(), Value::from(true));
        assert_eq!(seq_method(&seq(&[]), "exists", &[]).unwrap(), Value::from(false));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let v = seq(&[1]);
        assert!(seq_method(&v, "reverse", &[]).is_err());
        assert!(str_method(&Value::from("x"), "strip", &[]).is_err());
    }
}
