//! Flag resolution across the state and default directories.
//!
//! A [`Context`] owns the active [`Options`] and implements every flag
//! operation on top of [`crate::storage`].
//!
//! ## Precedence (highest to lowest)
//!
//! 1. State directory (`Origin::State`)
//! 2. Default directory, only with `use-default-directory` (`Origin::Default`)
//! 3. Nothing found: the flag is off (`Origin::None`)

use crate::config::{OptionValue, Options};
use crate::models::{FlagStateTuple, Origin, compare_by_flag};
use crate::storage::{self, MAX_PATH_LEN};
use crate::{Error, Result};

/// Library context holding the active options.
#[derive(Debug, Clone, Default)]
pub struct Context {
    options: Options,
}

impl Context {
    /// Create a context using the built-in default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context using the given options.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Start from fresh built-in defaults and return them for customizing.
    pub fn options_init(&mut self) -> &mut Options {
        self.options = Options::default();
        &mut self.options
    }

    /// Discard customized options, reverting to the built-in defaults.
    pub fn options_destroy(&mut self) {
        self.options = Options::default();
    }

    /// Apply a single option to the active options.
    pub fn set_option(&mut self, value: OptionValue) {
        self.options.set(value);
    }

    // ==================== Observers ====================

    /// Get the state of a flag, discarding its origin.
    pub fn get(&self, flag: &str) -> Result<bool> {
        self.get_with_origin(flag).map(|(state, _)| state)
    }

    /// Get the state of a flag and where it came from.
    ///
    /// A flag with no backing file in any consulted directory is off with
    /// [`Origin::None`]; that is not an error.
    pub fn get_with_origin(&self, flag: &str) -> Result<(bool, Origin)> {
        let fallback = self.options.fallback_directory();

        let path = storage::flag_path(self.options.state_directory(), flag, MAX_PATH_LEN)?;
        match storage::read_state(&path, Origin::State, fallback.is_some()) {
            Err(Error::NoSuchEntry(_)) => {}
            result => return result,
        }

        // Only reachable with a fallback directory configured.
        let Some(default_directory) = fallback else {
            return Ok((false, Origin::None));
        };

        tracing::debug!(flag, directory = %default_directory.display(), "falling back to default directory");

        let path = storage::flag_path(default_directory, flag, MAX_PATH_LEN)?;
        storage::read_state(&path, Origin::Default, false)
    }

    /// Resolve every tuple in place, filling its state and origin.
    ///
    /// Stops at the first failure; earlier tuples keep their resolved values.
    pub fn get_multiple(&self, tuples: &mut [FlagStateTuple]) -> Result<()> {
        for tuple in tuples.iter_mut() {
            let (state, origin) = self.get_with_origin(&tuple.flag)?;
            tuple.state = state;
            tuple.origin = origin;
        }
        Ok(())
    }

    /// Count the flags [`Context::copy_all`] would return.
    pub fn count(&self) -> Result<usize> {
        match self.options.fallback_directory() {
            None => storage::count_directory(self.options.state_directory()),
            Some(_) => {
                let (state, default) = self.sorted_listings()?;
                Ok(storage::union_count(&state, &default))
            }
        }
    }

    /// Copy every flag with its state and origin.
    ///
    /// Without the fallback this lists the state directory in directory
    /// order. With it, the result is the union of both directories sorted
    /// by flag, with state directory entries overriding default ones.
    pub fn copy_all(&self) -> Result<Vec<FlagStateTuple>> {
        match self.options.fallback_directory() {
            None => storage::list_directory(self.options.state_directory(), Origin::State),
            Some(_) => {
                let (state, default) = self.sorted_listings()?;
                Ok(storage::union_by_flag(state, default))
            }
        }
    }

    /// List the state and default directories, each sorted by flag.
    fn sorted_listings(&self) -> Result<(Vec<FlagStateTuple>, Vec<FlagStateTuple>)> {
        let mut default = match self.options.default_directory() {
            Some(directory) => storage::list_directory(directory, Origin::Default)?,
            None => Vec::new(),
        };
        let mut state = storage::list_directory(self.options.state_directory(), Origin::State)?;

        default.sort_by(compare_by_flag);
        state.sort_by(compare_by_flag);

        Ok((state, default))
    }

    // ==================== Mutators ====================

    /// Set a flag in the state directory.
    ///
    /// Unless `force-state` is set, the backing file must already exist;
    /// otherwise this fails with [`Error::NoSuchEntry`].
    pub fn set(&self, flag: &str, state: bool) -> Result<()> {
        if flag.is_empty() {
            return Err(Error::InvalidArgument(
                "flag name must not be empty".to_string(),
            ));
        }

        storage::write_state(
            self.options.state_directory(),
            flag,
            state,
            self.options.force_state(),
        )
    }

    /// Set every tuple's flag to its state, in order.
    ///
    /// Stops at the first failure; earlier flags stay set.
    pub fn set_multiple(&self, tuples: &[FlagStateTuple]) -> Result<()> {
        for tuple in tuples {
            self.set(&tuple.flag, tuple.state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUILTIN_STATE_DIRECTORY;
    use crate::test_utils::TestEnv;
    use std::fs;
    use std::path::{Path, PathBuf};

    // ==================== Lifetime Tests ====================

    #[test]
    fn test_new_context_uses_builtin_defaults() {
        let context = Context::new();
        assert_eq!(context.options(), &Options::default());
    }

    #[test]
    fn test_options_destroy_reverts_to_defaults() {
        let mut context = Context::new();
        context
            .options_init()
            .set(OptionValue::StateDirectory(PathBuf::from("/tmp/custom")));
        context.set_option(OptionValue::ForceState(true));
        assert_eq!(context.options().state_directory(), Path::new("/tmp/custom"));

        context.options_destroy();
        assert_eq!(
            context.options().state_directory(),
            Path::new(BUILTIN_STATE_DIRECTORY)
        );
        assert!(!context.options().force_state());
    }

    // ==================== Get Tests ====================

    #[test]
    fn test_get_missing_flag_is_off_with_no_origin() {
        let env = TestEnv::new();

        for use_default in [false, true] {
            let context = env.context(use_default);
            assert_eq!(context.get_with_origin("missing").unwrap(), (false, Origin::None));
            assert!(!context.get("missing").unwrap());
        }
    }

    #[test]
    fn test_get_from_state_directory() {
        let env = TestEnv::new();
        env.write_state("wifi", "On\n");

        let context = env.context(false);
        assert_eq!(context.get_with_origin("wifi").unwrap(), (true, Origin::State));
    }

    #[test]
    fn test_get_falls_back_to_default_directory() {
        let env = TestEnv::new();
        env.write_default("wifi", "off\n");

        let context = env.context(true);
        assert_eq!(context.get_with_origin("wifi").unwrap(), (false, Origin::Default));
    }

    #[test]
    fn test_get_ignores_default_directory_without_fallback() {
        let env = TestEnv::new();
        env.write_default("wifi", "on\n");

        let context = env.context(false);
        assert_eq!(context.get_with_origin("wifi").unwrap(), (false, Origin::None));
    }

    #[test]
    fn test_get_state_directory_takes_precedence() {
        let env = TestEnv::new();
        env.write_state("wifi", "off\n");
        env.write_default("wifi", "on\n");

        let context = env.context(true);
        assert_eq!(context.get_with_origin("wifi").unwrap(), (false, Origin::State));
    }

    #[test]
    fn test_get_empty_state_file_shadows_default() {
        let env = TestEnv::new();
        env.write_state("wifi", "");
        env.write_default("wifi", "on\n");

        let context = env.context(true);
        assert_eq!(context.get_with_origin("wifi").unwrap(), (false, Origin::State));
    }

    #[test]
    fn test_get_malformed_state_file_does_not_fall_back() {
        let env = TestEnv::new();
        env.write_state("wifi", "sideways\n");
        env.write_default("wifi", "on\n");

        let err = env.context(true).get_with_origin("wifi").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_get_unreadable_state_entry_does_not_fall_back() {
        let env = TestEnv::new();
        fs::create_dir(env.state_path().join("wifi")).unwrap();
        env.write_default("wifi", "on\n");

        let err = env.context(true).get_with_origin("wifi").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_get_malformed_default_file_is_error() {
        let env = TestEnv::new();
        env.write_default("wifi", "sideways\n");

        let err = env.context(true).get_with_origin("wifi").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_get_empty_flag_rejected() {
        let env = TestEnv::new();
        let err = env.context(true).get("").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_get_multiple_fills_tuples() {
        let env = TestEnv::new();
        env.write_state("a", "on\n");
        env.write_default("b", "on\n");

        let mut tuples = crate::models::flag_state_tuples(3).unwrap();
        for (tuple, flag) in tuples.iter_mut().zip(["a", "b", "c"]) {
            tuple.flag = flag.to_string();
        }

        env.context(true).get_multiple(&mut tuples).unwrap();
        assert_eq!(
            tuples,
            vec![
                FlagStateTuple::new("a", true, Origin::State),
                FlagStateTuple::new("b", true, Origin::Default),
                FlagStateTuple::new("c", false, Origin::None),
            ]
        );
    }

    #[test]
    fn test_get_multiple_stops_at_first_error() {
        let env = TestEnv::new();
        env.write_state("a", "on\n");
        env.write_state("bad", "junk\n");

        let mut tuples = vec![
            FlagStateTuple::unresolved("a"),
            FlagStateTuple::unresolved("bad"),
            FlagStateTuple::unresolved("c"),
        ];
        assert!(env.context(false).get_multiple(&mut tuples).is_err());
        assert_eq!(tuples[0].origin, Origin::State);
        assert_eq!(tuples[2].origin, Origin::Unknown);
    }

    // ==================== Listing Tests ====================

    #[test]
    fn test_empty_directories() {
        let env = TestEnv::new();

        for use_default in [false, true] {
            let context = env.context(use_default);
            assert_eq!(context.count().unwrap(), 0);
            assert!(context.copy_all().unwrap().is_empty());
        }
    }

    #[test]
    fn test_copy_all_union_with_fallback() {
        let env = TestEnv::new();
        env.write_state("a", "on\n");
        env.write_state("b", "off\n");
        env.write_default("b", "on\n");
        env.write_default("c", "on\n");

        let context = env.context(true);
        assert_eq!(context.count().unwrap(), 3);
        assert_eq!(
            context.copy_all().unwrap(),
            vec![
                FlagStateTuple::new("a", true, Origin::State),
                FlagStateTuple::new("b", false, Origin::State),
                FlagStateTuple::new("c", true, Origin::Default),
            ]
        );
    }

    #[test]
    fn test_copy_all_without_fallback_lists_state_only() {
        let env = TestEnv::new();
        env.write_state("a", "on\n");
        env.write_default("c", "on\n");

        let context = env.context(false);
        assert_eq!(context.count().unwrap(), 1);
        assert_eq!(
            context.copy_all().unwrap(),
            vec![FlagStateTuple::new("a", true, Origin::State)]
        );
    }

    #[test]
    fn test_copy_all_missing_state_directory_is_error() {
        let env = TestEnv::new();
        let context = Context::with_options(env.options(true).with(OptionValue::StateDirectory(
            env.state_path().join("missing"),
        )));

        assert!(matches!(context.copy_all(), Err(Error::Io { .. })));
        assert!(matches!(context.count(), Err(Error::Io { .. })));
    }

    // ==================== Set Tests ====================

    #[test]
    fn test_set_without_force_requires_existing_file() {
        let env = TestEnv::new();

        let err = env.context(false).set("wifi", true).unwrap_err();
        assert!(matches!(err, Error::NoSuchEntry(_)));
    }

    #[test]
    fn test_set_with_force_creates_file() {
        let env = TestEnv::new();
        let mut context = env.context(false);
        context.set_option(OptionValue::ForceState(true));

        context.set("wifi", true).unwrap();
        assert_eq!(context.get_with_origin("wifi").unwrap(), (true, Origin::State));
        assert_eq!(
            fs::read_to_string(env.state_path().join("wifi")).unwrap(),
            "on\n"
        );
    }

    #[test]
    fn test_set_is_idempotent() {
        let env = TestEnv::new();
        env.write_state("wifi", "off\n");
        let context = env.context(false);

        context.set("wifi", true).unwrap();
        context.set("wifi", true).unwrap();
        assert_eq!(context.get_with_origin("wifi").unwrap(), (true, Origin::State));
    }

    #[test]
    fn test_set_never_touches_default_directory() {
        let env = TestEnv::new();
        env.write_default("wifi", "on\n");
        let context = env.context(true);

        assert!(context.set("wifi", false).unwrap_err().is_no_such_entry());
        assert_eq!(
            fs::read_to_string(env.default_path().join("wifi")).unwrap(),
            "on\n"
        );
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_set_failed_write_is_overflow() {
        let env = TestEnv::new();
        std::os::unix::fs::symlink("/dev/full", env.state_path().join("wifi")).unwrap();

        let err = env.context(false).set("wifi", true).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
    }

    #[test]
    fn test_set_empty_flag_rejected() {
        let env = TestEnv::new();
        let err = env.context(false).set("", true).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_set_multiple() {
        let env = TestEnv::new();
        let context = Context::with_options(env.options(false).with(OptionValue::ForceState(true)));

        context
            .set_multiple(&[
                FlagStateTuple::new("a", true, Origin::Unknown),
                FlagStateTuple::new("b", false, Origin::Unknown),
            ])
            .unwrap();

        assert!(context.get("a").unwrap());
        assert!(!context.get("b").unwrap());
        assert_eq!(context.count().unwrap(), 2);
    }
}
