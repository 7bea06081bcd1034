//! Flag registration, marking and flag groups.

use std::net::IpAddr;
use std::time::Duration;

use super::CommandBuilder;
use crate::cli::command::FlagGroup;
use crate::cli::flag::{Flag, FlagKind};

/// Generates the four registration methods of each flag kind: local,
/// local with shorthand, persistent, persistent with shorthand.
macro_rules! typed_flags {
    ($( $kind:ident($ty:ty) => $local:ident, $local_p:ident, $persistent:ident, $persistent_p:ident; )*) => {
        impl CommandBuilder {
            $(
                #[doc = concat!("Adds a local `", stringify!($kind), "` flag.")]
                pub fn $local(self, name: &str, value: $ty, usage: &str) -> Self {
                    self.with_flag(Flag::new(name, FlagKind::$kind, value, usage))
                }

                #[doc = concat!("Adds a local `", stringify!($kind), "` flag with a one-letter shorthand.")]
                pub fn $local_p(self, name: &str, shorthand: char, value: $ty, usage: &str) -> Self {
                    self.with_flag(Flag::new(name, FlagKind::$kind, value, usage).shorthand(shorthand))
                }

                #[doc = concat!("Adds a persistent `", stringify!($kind), "` flag, inherited by all subcommands.")]
                pub fn $persistent(self, name: &str, value: $ty, usage: &str) -> Self {
                    self.with_persistent_flag(Flag::new(name, FlagKind::$kind, value, usage))
                }

                #[doc = concat!("Adds a persistent `", stringify!($kind), "` flag with a one-letter shorthand.")]
                pub fn $persistent_p(self, name: &str, shorthand: char, value: $ty, usage: &str) -> Self {
                    self.with_persistent_flag(
                        Flag::new(name, FlagKind::$kind, value, usage).shorthand(shorthand),
                    )
                }
            )*
        }
    };
}

typed_flags! {
    Bool(bool) => with_bool_flag, with_bool_p_flag, with_bool_persistent_flag, with_bool_p_persistent_flag;
    BoolSlice(&[bool]) => with_bool_slice_flag, with_bool_slice_p_flag, with_bool_slice_persistent_flag, with_bool_slice_p_persistent_flag;
    Duration(Duration) => with_duration_flag, with_duration_p_flag, with_duration_persistent_flag, with_duration_p_persistent_flag;
    DurationSlice(&[Duration]) => with_duration_slice_flag, with_duration_slice_p_flag, with_duration_slice_persistent_flag, with_duration_slice_p_persistent_flag;
    Float32(f32) => with_float32_flag, with_float32_p_flag, with_float32_persistent_flag, with_float32_p_persistent_flag;
    Float32Slice(&[f32]) => with_float32_slice_flag, with_float32_slice_p_flag, with_float32_slice_persistent_flag, with_float32_slice_p_persistent_flag;
    Float64(f64) => with_float64_flag, with_float64_p_flag, with_float64_persistent_flag, with_float64_p_persistent_flag;
    Float64Slice(&[f64]) => with_float64_slice_flag, with_float64_slice_p_flag, with_float64_slice_persistent_flag, with_float64_slice_p_persistent_flag;
    Int(i64) => with_int_flag, with_int_p_flag, with_int_persistent_flag, with_int_p_persistent_flag;
    Int8(i8) => with_int8_flag, with_int8_p_flag, with_int8_persistent_flag, with_int8_p_persistent_flag;
    Int16(i16) => with_int16_flag, with_int16_p_flag, with_int16_persistent_flag, with_int16_p_persistent_flag;
    Int32(i32) => with_int32_flag, with_int32_p_flag, with_int32_persistent_flag, with_int32_p_persistent_flag;
    Int64(i64) => with_int64_flag, with_int64_p_flag, with_int64_persistent_flag, with_int64_p_persistent_flag;
    IntSlice(&[i64]) => with_int_slice_flag, with_int_slice_p_flag, with_int_slice_persistent_flag, with_int_slice_p_persistent_flag;
    Int32Slice(&[i32]) => with_int32_slice_flag, with_int32_slice_p_flag, with_int32_slice_persistent_flag, with_int32_slice_p_persistent_flag;
    Int64Slice(&[i64]) => with_int64_slice_flag, with_int64_slice_p_flag, with_int64_slice_persistent_flag, with_int64_slice_p_persistent_flag;
    Uint(u64) => with_uint_flag, with_uint_p_flag, with_uint_persistent_flag, with_uint_p_persistent_flag;
    Uint8(u8) => with_uint8_flag, with_uint8_p_flag, with_uint8_persistent_flag, with_uint8_p_persistent_flag;
    Uint16(u16) => with_uint16_flag, with_uint16_p_flag, with_uint16_persistent_flag, with_uint16_p_persistent_flag;
    Uint32(u32) => with_uint32_flag, with_uint32_p_flag, with_uint32_persistent_flag, with_uint32_p_persistent_flag;
    Uint64(u64) => with_uint64_flag, with_uint64_p_flag, with_uint64_persistent_flag, with_uint64_p_persistent_flag;
    UintSlice(&[u64]) => with_uint_slice_flag, with_uint_slice_p_flag, with_uint_slice_persistent_flag, with_uint_slice_p_persistent_flag;
    String(&str) => with_string_flag, with_string_p_flag, with_string_persistent_flag, with_string_p_persistent_flag;
    StringSlice(&[&str]) => with_string_slice_flag, with_string_slice_p_flag, with_string_slice_persistent_flag, with_string_slice_p_persistent_flag;
    StringArray(&[&str]) => with_string_array_flag, with_string_array_p_flag, with_string_array_persistent_flag, with_string_array_p_persistent_flag;
    StringToInt(&[(&str, i64)]) => with_string_to_int_flag, with_string_to_int_p_flag, with_string_to_int_persistent_flag, with_string_to_int_p_persistent_flag;
    StringToInt64(&[(&str, i64)]) => with_string_to_int64_flag, with_string_to_int64_p_flag, with_string_to_int64_persistent_flag, with_string_to_int64_p_persistent_flag;
    StringToString(&[(&str, &str)]) => with_string_to_string_flag, with_string_to_string_p_flag, with_string_to_string_persistent_flag, with_string_to_string_p_persistent_flag;
    Ip(Option<IpAddr>) => with_ip_flag, with_ip_p_flag, with_ip_persistent_flag, with_ip_p_persistent_flag;
    IpSlice(&[IpAddr]) => with_ip_slice_flag, with_ip_slice_p_flag, with_ip_slice_persistent_flag, with_ip_slice_p_persistent_flag;
}

impl CommandBuilder {
    /// Adds a local counter flag: each occurrence increments it (`-vvv`).
    pub fn with_count_flag(self, name: &str, usage: &str) -> Self {
        self.with_flag(Flag::new(name, FlagKind::Count, 0u8, usage))
    }

    pub fn with_count_p_flag(self, name: &str, shorthand: char, usage: &str) -> Self {
        self.with_flag(Flag::new(name, FlagKind::Count, 0u8, usage).shorthand(shorthand))
    }

    pub fn with_count_persistent_flag(self, name: &str, usage: &str) -> Self {
        self.with_persistent_flag(Flag::new(name, FlagKind::Count, 0u8, usage))
    }

    pub fn with_count_p_persistent_flag(self, name: &str, shorthand: char, usage: &str) -> Self {
        self.with_persistent_flag(Flag::new(name, FlagKind::Count, 0u8, usage).shorthand(shorthand))
    }

    /// Adds a pre-built local flag.
    ///
    /// # Panics
    ///
    /// If the command already defines a flag with the same name or shorthand.
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.assert_unique(&flag);
        self.cmd.flags.push(flag);
        self
    }

    /// Adds a pre-built persistent flag.
    ///
    /// # Panics
    ///
    /// If the command already defines a flag with the same name or shorthand.
    pub fn with_persistent_flag(mut self, flag: Flag) -> Self {
        self.assert_unique(&flag);
        self.cmd.persistent_flags.push(flag);
        self
    }

    fn assert_unique(&self, flag: &Flag) {
        for existing in self.cmd.flags.iter().chain(&self.cmd.persistent_flags) {
            if existing.name == flag.name {
                panic!("{} flag redefined: {}", self.cmd.name(), flag.name);
            }
            if flag.shorthand.is_some() && existing.shorthand == flag.shorthand {
                panic!(
                    "unable to redefine {:?} shorthand in {:?} flagset: it's already used for {:?} flag",
                    flag.shorthand.unwrap_or_default(),
                    self.cmd.name(),
                    existing.name
                );
            }
        }
    }

    // Local-or-persistent lookup, as used by the mark_flag_* family.
    fn flag_mut(&mut self, name: &str) -> &mut Flag {
        let cmd_name = self.cmd.name().to_string();
        self.cmd
            .flags
            .iter_mut()
            .chain(self.cmd.persistent_flags.iter_mut())
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("flag {name:?} does not exist on {cmd_name:?}"))
    }

    fn persistent_flag_mut(&mut self, name: &str) -> &mut Flag {
        let cmd_name = self.cmd.name().to_string();
        self.cmd
            .persistent_flags
            .iter_mut()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("persistent flag {name:?} does not exist on {cmd_name:?}"))
    }

    /// Hides a flag from usage output. It keeps working.
    ///
    /// # Panics
    ///
    /// If no local or persistent flag `name` is defined on this command.
    pub fn mark_flag_hidden(mut self, name: &str) -> Self {
        self.flag_mut(name).hidden = true;
        self
    }

    /// Deprecates a flag: it is hidden, and using it prints
    /// `Flag --name has been deprecated, message`.
    ///
    /// # Panics
    ///
    /// If the flag does not exist or `message` is empty.
    pub fn mark_flag_deprecated(mut self, name: &str, message: &str) -> Self {
        assert!(!message.is_empty(), "deprecated message for flag {name:?} must be set");
        let flag = self.flag_mut(name);
        flag.deprecated = Some(message.to_string());
        flag.hidden = true;
        self
    }

    /// Deprecates a flag's shorthand: usage output shows only the long form,
    /// and using the shorthand prints a notice.
    ///
    /// # Panics
    ///
    /// If the flag does not exist or `message` is empty.
    pub fn mark_flag_shorthand_deprecated(mut self, name: &str, message: &str) -> Self {
        assert!(!message.is_empty(), "shorthand deprecated message for flag {name:?} must be set");
        self.flag_mut(name).shorthand_deprecated = Some(message.to_string());
        self
    }

    /// Requires the flag on every invocation of this command.
    ///
    /// # Panics
    ///
    /// If the flag does not exist.
    pub fn mark_flag_required(mut self, name: &str) -> Self {
        self.flag_mut(name).required = true;
        self
    }

    pub fn mark_persistent_flag_hidden(mut self, name: &str) -> Self {
        self.persistent_flag_mut(name).hidden = true;
        self
    }

    pub fn mark_persistent_flag_deprecated(mut self, name: &str, message: &str) -> Self {
        assert!(!message.is_empty(), "deprecated message for flag {name:?} must be set");
        let flag = self.persistent_flag_mut(name);
        flag.deprecated = Some(message.to_string());
        flag.hidden = true;
        self
    }

    pub fn mark_persistent_flag_shorthand_deprecated(mut self, name: &str, message: &str) -> Self {
        assert!(!message.is_empty(), "shorthand deprecated message for flag {name:?} must be set");
        self.persistent_flag_mut(name).shorthand_deprecated = Some(message.to_string());
        self
    }

    /// Requires the persistent flag on this command and all descendants.
    pub fn mark_persistent_flag_required(mut self, name: &str) -> Self {
        self.persistent_flag_mut(name).required = true;
        self
    }

    /// If any of the flags is set, all of them must be.
    ///
    /// # Panics
    ///
    /// If one of the flags does not exist on this command.
    pub fn mark_flags_required_together(mut self, names: &[&str]) -> Self {
        let names = self.group_names(names);
        self.cmd.flag_groups.push(FlagGroup::RequiredTogether(names));
        self
    }

    /// At least one of the flags must be set.
    ///
    /// # Panics
    ///
    /// If one of the flags does not exist on this command.
    pub fn mark_flags_one_required(mut self, names: &[&str]) -> Self {
        let names = self.group_names(names);
        self.cmd.flag_groups.push(FlagGroup::OneRequired(names));
        self
    }

    /// At most one of the flags may be set.
    ///
    /// # Panics
    ///
    /// If one of the flags does not exist on this command.
    pub fn mark_flags_mutually_exclusive(mut self, names: &[&str]) -> Self {
        let names = self.group_names(names);
        self.cmd.flag_groups.push(FlagGroup::MutuallyExclusive(names));
        self
    }

    fn group_names(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|name| {
                if self.cmd.flag(name).is_none() {
                    panic!("failed to find flag {name:?} and mark it as being in a flag group");
                }
                name.to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_flag_registration() {
        let cmd = CommandBuilder::new("c")
            .with_string_p_flag("name", 'n', "bob", "who")
            .with_int_persistent_flag("port", 80, "port")
            .with_string_slice_flag("tag", &["a", "b"], "tags")
            .with_ip_flag("bind", None, "bind address")
            .with_count_p_flag("verbose", 'v', "verbosity")
            .build();

        let name = cmd.flag("name").unwrap();
        assert_eq!(name.kind(), FlagKind::String);
        assert_eq!(name.short(), Some('n'));
        assert_eq!(name.default_text(), "bob");

        assert_eq!(cmd.persistent_flags()[0].name(), "port");
        assert_eq!(cmd.flag("tag").unwrap().default_text(), "[a,b]");
        assert_eq!(cmd.flag("bind").unwrap().default_text(), "<nil>");
        assert_eq!(cmd.flag("verbose").unwrap().kind(), FlagKind::Count);
    }

    #[test]
    fn test_marking() {
        let cmd = CommandBuilder::new("c")
            .with_bool_p_flag("force", 'f', false, "")
            .with_string_persistent_flag("token", "", "")
            .mark_flag_hidden("force")
            .mark_flag_shorthand_deprecated("force", "use --force")
            .mark_flag_required("token")
            .mark_persistent_flag_deprecated("token", "use a config file")
            .build();

        let force = cmd.flag("force").unwrap();
        assert!(force.is_hidden());
        assert_eq!(force.shorthand_deprecation(), Some("use --force"));

        let token = cmd.flag("token").unwrap();
        assert!(token.is_required());
        assert!(token.is_hidden());
        assert_eq!(token.deprecation(), Some("use a config file"));
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn test_mark_unknown_flag_panics() {
        let _ = CommandBuilder::new("c").mark_flag_required("nope");
    }

    #[test]
    #[should_panic(expected = "flag redefined")]
    fn test_duplicate_flag_panics() {
        let _ = CommandBuilder::new("c")
            .with_bool_flag("x", false, "")
            .with_string_persistent_flag("x", "", "");
    }

    #[test]
    #[should_panic(expected = "shorthand")]
    fn test_duplicate_shorthand_panics() {
        let _ = CommandBuilder::new("c")
            .with_bool_p_flag("all", 'a', false, "")
            .with_bool_p_flag("append", 'a', false, "");
    }

    #[test]
    fn test_flag_groups_recorded() {
        let cmd = CommandBuilder::new("c")
            .with_bool_flag("json", false, "")
            .with_bool_flag("yaml", false, "")
            .mark_flags_mutually_exclusive(&["json", "yaml"])
            .build();
        assert_eq!(
            cmd.flag_groups,
            vec![FlagGroup::MutuallyExclusive(vec!["json".into(), "yaml".into()])]
        );
    }

    #[test]
    #[should_panic(expected = "flag group")]
    fn test_flag_group_with_unknown_flag_panics() {
        let _ = CommandBuilder::new("c")
            .with_bool_flag("json", false, "")
            .mark_flags_one_required(&["json", "xml"]);
    }
}
