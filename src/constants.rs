//! Global Constants
//!
//! Centralized fixed values for the calling-convention rules and the
//! bookkeeping fields every emitted member carries.

/// Source-language calling-convention markers.
pub mod convention {
    /// Names that mark a constructor/call entry point. Kept even though
    /// they start with the private-name prefix.
    pub const CONSTRUCTOR_MARKERS: [&str; 2] = ["__init__", "__call__"];

    /// Leading character marking a private name, filtered from output.
    pub const PRIVATE_PREFIX: char = '_';

    /// Description attached to receiver parameters (`self`/`cls`).
    pub const OBJECT_REFERENCE_DESCRIPTION: &str = "Object reference";

    /// Sentinel `Object` reference used as the type of a `cls` receiver.
    pub const SELF_TYPE_NAME: &str = "self";
}

/// Fixed bookkeeping fields appended to every member.
pub mod bookkeeping {
    pub const INPUT_PARSER: &str = "input_parser";
    pub const OUTPUT_PARSER: &str = "output_parser";
    pub const PARSER_DEFAULT: &str = "pickle";

    /// Allowed values for the parser-selection fields.
    pub const PARSER_OPTIONS: [&str; 5] = ["pickle", "eval", "npy", "path", "dataurl"];

    pub const EXECUTION_TIME: &str = "execution_time";
    pub const EXECUTION_TIME_DEFAULT: &str = "5";
    pub const EXECUTION_TIME_DESCRIPTION: &str =
        "Estimate of execution time (in seconds) for this application.";

    pub const NUM_CPUS: &str = "num_cpus";
    pub const NUM_CPUS_DEFAULT: &str = "1";
    pub const NUM_CPUS_DESCRIPTION: &str = "Number of cores used.";

    pub const GROUP_START: &str = "group_start";
    pub const GROUP_START_DEFAULT: &str = "false";
    pub const GROUP_START_DESCRIPTION: &str = "Is this node the start of a group?";

    pub const FUNC_NAME: &str = "func_name";
    pub const FUNC_NAME_DESCRIPTION: &str = "Complete import path of function";

    /// Shared-library location field for compiled source trees.
    pub const LIBPATH: &str = "libpath";
    pub const LIBPATH_DESCRIPTION: &str =
        "The location of the shared object/DLL that implements this application";

    /// Import-path field for interpreted source trees.
    pub const DROPCLASS: &str = "dropclass";
    pub const DROPCLASS_DEFAULT: &str = "dlg.apps.pyfunc.PyFuncApp";
    pub const DROPCLASS_DESCRIPTION: &str =
        "The python class that implements this application";
}

/// Summary prefixes marking the member classification for readers.
pub mod summary {
    pub const CLASSMETHOD_PREFIX: &str = "classmethod: ";
    pub const MEMBERFUNCTION_PREFIX: &str = "memberfunction: ";
}
