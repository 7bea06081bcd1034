//! MiniJinja filter registration.

use minijinja::{Environment, Error, ErrorKind, Value};

use crate::util::{rpad, slice_to_csv, trim_right_space};

/// Registers the help-text filters on a minijinja environment.
///
/// # Filters Added
///
/// - `rpad(width)` - Pad a value on the right to `width` columns
/// - `trim_right_space` / `trim_trailing_whitespaces` - Strip trailing whitespace
/// - `slice_to_csv` - Join a list with `", "`
///
/// `trim` is minijinja's builtin and is available as well.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("rpad", |value: Value, width: usize| -> String {
        rpad(&value_to_string(&value), width)
    });

    env.add_filter("trim_right_space", |value: Value| -> String {
        trim_right_space(&value_to_string(&value)).to_string()
    });
    env.add_filter("trim_trailing_whitespaces", |value: Value| -> String {
        trim_right_space(&value_to_string(&value)).to_string()
    });

    env.add_filter("slice_to_csv", |value: Value| -> Result<String, Error> {
        if value.is_undefined() || value.is_none() {
            return Ok(String::new());
        }
        let iter = value.try_iter().map_err(|_| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("slice_to_csv expects a sequence, got {}", value.kind()),
            )
        })?;
        let items: Vec<String> = iter.map(|v| value_to_string(&v)).collect();
        Ok(slice_to_csv(&items))
    });
}

fn value_to_string(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else if let Some(s) = value.as_str() {
        s.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env
    }

    #[test]
    fn test_rpad_filter() {
        let out = env()
            .render_str("[{{ name | rpad(6) }}]", context! { name => "help" })
            .unwrap();
        assert_eq!(out, "[help  ]");
    }

    #[test]
    fn test_slice_to_csv_filter() {
        let out = env()
            .render_str(
                "{{ args | slice_to_csv }}",
                context! { args => vec!["profile1", "prof1"] },
            )
            .unwrap();
        assert_eq!(out, "profile1, prof1");
    }

    #[test]
    fn test_slice_to_csv_undefined_is_empty() {
        let out = env().render_str("[{{ missing | slice_to_csv }}]", ()).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_slice_to_csv_rejects_scalars() {
        let result = env().render_str("{{ 42 | slice_to_csv }}", ());
        assert!(result.is_err());
    }

    #[test]
    fn test_trim_trailing_whitespaces_filter() {
        let out = env()
            .render_str(
                "{{ usages | trim_trailing_whitespaces }}|",
                context! { usages => "  -h, --help   help for x\n" },
            )
            .unwrap();
        assert_eq!(out, "  -h, --help   help for x|");
    }
}
