//! Typed flags and their clap arguments.
//!
//! A [`Flag`] carries everything needed to both parse a flag (through a
//! generated [`clap::Arg`]) and document it in the "Flags:" block of usage output.
//! The value type is described by [`FlagKind`]; values are read back inside
//! hooks through [`Invocation`](crate::Invocation) with the Rust type listed
//! for each kind.

mod duration;
mod usage;

pub use duration::{format_duration, parse_duration};
pub(crate) use usage::flag_usages;

use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use clap::builder::ValueParser;
use clap::{value_parser, Arg, ArgAction};

/// The value type of a flag.
///
/// | Kind | Read back as |
/// |------|--------------|
/// | `Bool` | `bool` |
/// | `Count` | `u8` (via `get_count`) |
/// | `Duration` | `std::time::Duration` |
/// | `Float32` / `Float64` | `f32` / `f64` |
/// | `Int`, `Int64` | `i64` |
/// | `Int8` / `Int16` / `Int32` | `i8` / `i16` / `i32` |
/// | `Uint`, `Uint64` | `u64` |
/// | `Uint8` / `Uint16` / `Uint32` | `u8` / `u16` / `u32` |
/// | `String` | `String` |
/// | `Ip` | `std::net::IpAddr` |
/// | `*Slice`, `StringArray` | `get_many` of the element type |
/// | `StringToInt`, `StringToInt64` | `get_map::<i64>` |
/// | `StringToString` | `get_map::<String>` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    Bool,
    BoolSlice,
    Count,
    Duration,
    DurationSlice,
    Float32,
    Float32Slice,
    Float64,
    Float64Slice,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    IntSlice,
    Int32Slice,
    Int64Slice,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    UintSlice,
    String,
    StringSlice,
    StringArray,
    StringToInt,
    StringToInt64,
    StringToString,
    Ip,
    IpSlice,
}

impl FlagKind {
    /// The type name, used as the value placeholder in flag usages.
    pub fn type_name(self) -> &'static str {
        match self {
            FlagKind::Bool => "bool",
            FlagKind::BoolSlice => "boolSlice",
            FlagKind::Count => "count",
            FlagKind::Duration => "duration",
            FlagKind::DurationSlice => "durationSlice",
            FlagKind::Float32 => "float32",
            FlagKind::Float32Slice => "float32Slice",
            FlagKind::Float64 => "float64",
            FlagKind::Float64Slice => "float64Slice",
            FlagKind::Int => "int",
            FlagKind::Int8 => "int8",
            FlagKind::Int16 => "int16",
            FlagKind::Int32 => "int32",
            FlagKind::Int64 => "int64",
            FlagKind::IntSlice => "intSlice",
            FlagKind::Int32Slice => "int32Slice",
            FlagKind::Int64Slice => "int64Slice",
            FlagKind::Uint => "uint",
            FlagKind::Uint8 => "uint8",
            FlagKind::Uint16 => "uint16",
            FlagKind::Uint32 => "uint32",
            FlagKind::Uint64 => "uint64",
            FlagKind::UintSlice => "uintSlice",
            FlagKind::String => "string",
            FlagKind::StringSlice => "stringSlice",
            FlagKind::StringArray => "stringArray",
            FlagKind::StringToInt => "stringToInt",
            FlagKind::StringToInt64 => "stringToInt64",
            FlagKind::StringToString => "stringToString",
            FlagKind::Ip => "ip",
            FlagKind::IpSlice => "ipSlice",
        }
    }

    /// The placeholder shown after the flag name when the usage has no
    /// backquoted name. Empty for booleans and counters.
    pub(crate) fn placeholder(self) -> &'static str {
        match self {
            FlagKind::Bool | FlagKind::Count => "",
            FlagKind::Float64 => "float",
            FlagKind::Int64 => "int",
            FlagKind::Uint64 => "uint",
            FlagKind::StringSlice | FlagKind::StringArray => "strings",
            FlagKind::IntSlice => "ints",
            FlagKind::UintSlice => "uints",
            FlagKind::BoolSlice => "bools",
            other => other.type_name(),
        }
    }

    /// True for kinds that accumulate several values.
    pub fn is_multi(self) -> bool {
        matches!(
            self,
            FlagKind::BoolSlice
                | FlagKind::DurationSlice
                | FlagKind::Float32Slice
                | FlagKind::Float64Slice
                | FlagKind::IntSlice
                | FlagKind::Int32Slice
                | FlagKind::Int64Slice
                | FlagKind::UintSlice
                | FlagKind::StringSlice
                | FlagKind::StringArray
                | FlagKind::StringToInt
                | FlagKind::StringToInt64
                | FlagKind::StringToString
                | FlagKind::IpSlice
        )
    }

    fn splits_on_comma(self) -> bool {
        self.is_multi() && self != FlagKind::StringArray
    }

    /// True if `default` is the zero value, which is not printed in usages.
    pub(crate) fn is_zero_default(self, default: &str) -> bool {
        match self {
            FlagKind::Bool => default == "false",
            FlagKind::String => default.is_empty(),
            FlagKind::Duration => default == "0" || default == "0s",
            FlagKind::Ip => default == "<nil>",
            kind if kind.is_multi() => default == "[]",
            _ => default == "0",
        }
    }

    fn value_parser(self) -> ValueParser {
        match self {
            FlagKind::Bool | FlagKind::BoolSlice | FlagKind::Count => ValueParser::new(parse_bool),
            FlagKind::Duration | FlagKind::DurationSlice => ValueParser::new(parse_duration),
            FlagKind::Float32 | FlagKind::Float32Slice => value_parser!(f32).into(),
            FlagKind::Float64 | FlagKind::Float64Slice => value_parser!(f64).into(),
            FlagKind::Int | FlagKind::Int64 | FlagKind::IntSlice | FlagKind::Int64Slice => {
                value_parser!(i64).into()
            }
            FlagKind::Int8 => value_parser!(i8).into(),
            FlagKind::Int16 => value_parser!(i16).into(),
            FlagKind::Int32 | FlagKind::Int32Slice => value_parser!(i32).into(),
            FlagKind::Uint | FlagKind::Uint64 | FlagKind::UintSlice => value_parser!(u64).into(),
            FlagKind::Uint8 => value_parser!(u8).into(),
            FlagKind::Uint16 => value_parser!(u16).into(),
            FlagKind::Uint32 => value_parser!(u32).into(),
            FlagKind::String | FlagKind::StringSlice | FlagKind::StringArray => {
                value_parser!(String).into()
            }
            FlagKind::StringToInt | FlagKind::StringToInt64 => {
                ValueParser::new(parse_key_value::<i64>)
            }
            FlagKind::StringToString => ValueParser::new(parse_key_value::<String>),
            FlagKind::Ip | FlagKind::IpSlice => value_parser!(IpAddr).into(),
        }
    }
}

/// Booleans in every spelling Go's `strconv.ParseBool` accepts.
pub(crate) fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(format!("strconv.ParseBool: parsing {s:?}: invalid syntax")),
    }
}

/// One `key=value` entry of a map flag.
fn parse_key_value<T>(s: &str) -> Result<(String, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("{s} must be formatted as key=value"))?;
    let value = value.parse::<T>().map_err(|e| e.to_string())?;
    Ok((key.to_string(), value))
}

/// A flag default in its two textual forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultValue {
    /// How the default is printed in usages (`[a,b]`, `1m0s`, `<nil>`).
    pub display: String,
    /// The raw values handed to clap when the flag is absent.
    pub values: Vec<String>,
}

/// Conversion of a Rust value into a flag default.
///
/// Implemented for the scalar types each [`FlagKind`] reads back, for
/// `(&str, V)` map entries, and for slices of those.
pub trait FlagDefault {
    fn to_default(&self) -> DefaultValue;
}

impl<T: FlagDefault + ?Sized> FlagDefault for &T {
    fn to_default(&self) -> DefaultValue {
        (**self).to_default()
    }
}

macro_rules! display_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FlagDefault for $ty {
                fn to_default(&self) -> DefaultValue {
                    let text = self.to_string();
                    DefaultValue { display: text.clone(), values: vec![text] }
                }
            }
        )*
    };
}

display_default!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, str, String, IpAddr);

impl FlagDefault for Duration {
    fn to_default(&self) -> DefaultValue {
        let text = format_duration(*self);
        DefaultValue {
            display: text.clone(),
            values: vec![text],
        }
    }
}

impl FlagDefault for Option<IpAddr> {
    fn to_default(&self) -> DefaultValue {
        match self {
            Some(ip) => ip.to_default(),
            None => DefaultValue {
                display: "<nil>".to_string(),
                values: Vec::new(),
            },
        }
    }
}

impl<V: FlagDefault> FlagDefault for (&str, V) {
    fn to_default(&self) -> DefaultValue {
        let text = format!("{}={}", self.0, self.1.to_default().display);
        DefaultValue {
            display: text.clone(),
            values: vec![text],
        }
    }
}

impl<T: FlagDefault> FlagDefault for [T] {
    fn to_default(&self) -> DefaultValue {
        let values: Vec<String> = self.iter().map(|v| v.to_default().display).collect();
        DefaultValue {
            display: format!("[{}]", values.join(",")),
            values,
        }
    }
}

/// A command-line flag.
///
/// Usually created through the typed `with_*_flag` methods of
/// [`CommandBuilder`](crate::CommandBuilder); build one directly to attach it
/// with [`with_flag`](crate::CommandBuilder::with_flag).
///
/// ```rust
/// use boa::{Flag, FlagKind};
///
/// let flag = Flag::new("port", FlagKind::Int, 8080i64, "port to listen on").shorthand('p');
/// assert_eq!(flag.default_text(), "8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub(crate) name: String,
    pub(crate) shorthand: Option<char>,
    pub(crate) usage: String,
    pub(crate) kind: FlagKind,
    pub(crate) default: DefaultValue,
    pub(crate) no_opt_default: Option<String>,
    pub(crate) hidden: bool,
    pub(crate) deprecated: Option<String>,
    pub(crate) shorthand_deprecated: Option<String>,
    pub(crate) required: bool,
}

impl Flag {
    /// Creates a flag of `kind` with a default value and usage text.
    pub fn new(
        name: impl Into<String>,
        kind: FlagKind,
        default: impl FlagDefault,
        usage: impl Into<String>,
    ) -> Self {
        let no_opt_default = match kind {
            FlagKind::Bool => Some("true".to_string()),
            FlagKind::Count => Some("+1".to_string()),
            _ => None,
        };
        Self {
            name: name.into(),
            shorthand: None,
            usage: usage.into(),
            kind,
            default: default.to_default(),
            no_opt_default,
            hidden: false,
            deprecated: None,
            shorthand_deprecated: None,
            required: false,
        }
    }

    /// Sets the one-letter shorthand.
    pub fn shorthand(mut self, c: char) -> Self {
        self.shorthand = Some(c);
        self
    }

    /// Sets the value used when the flag is given without a value
    /// (`--color` instead of `--color=auto`).
    pub fn no_opt_default(mut self, value: impl Into<String>) -> Self {
        self.no_opt_default = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self.hidden = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> Option<char> {
        self.shorthand
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    /// The default as printed in usages.
    pub fn default_text(&self) -> &str {
        &self.default.display
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    pub fn shorthand_deprecation(&self) -> Option<&str> {
        self.shorthand_deprecated.as_deref()
    }

    /// Builds the clap argument. Persistent flags become global so that
    /// subcommands accept them.
    pub(crate) fn to_arg(&self, persistent: bool) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.usage.clone())
            .hide(self.hidden)
            .global(persistent);
        if let Some(c) = self.shorthand {
            arg = arg.short(c);
        }

        arg = match self.kind {
            FlagKind::Count => return arg.action(ArgAction::Count),
            _ if self.kind.is_multi() => {
                let arg = arg.action(ArgAction::Append).value_parser(self.kind.value_parser());
                if self.kind.splits_on_comma() {
                    arg.value_delimiter(',')
                } else {
                    arg
                }
            }
            _ => arg.action(ArgAction::Set).value_parser(self.kind.value_parser()),
        };

        if let Some(missing) = &self.no_opt_default {
            arg = arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value(missing.clone());
        }
        if !self.default.values.is_empty() {
            arg = arg.default_values(self.default.values.clone());
        }
        arg
    }
}
