//! Default configuration values

/// Whether script output is shown after each run
pub const DEFAULT_SHOW_OUTPUT: bool = true;

/// Shell used to interpret command lines
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Editor used when neither config nor $EDITOR name one
pub const DEFAULT_EDITOR: &str = "vi";

/// Seed entry for a freshly created history file
pub const DEFAULT_HISTORY_ENTRY: &str = "ls";

/// Template written into newly created scripts
pub const DEFAULT_SCRIPT_TEMPLATE: &str = r#"#!/bin/zsh

#
# The following Environment Variables are created by the file manager
# before running your script:
#
# $CURRENT_DIRECTORY          The current directory for the cursor
# $CURRENT_FILE               The current file name for the cursor
# $LEFT_PANE                  The directory of the left file pane
# $LEFT_PANE_SELECTED_FILE    The last highlighted file in the left file pane
# $RIGHT_PANE                 The directory of the right file pane
# $RIGHT_PANE_SELECTED_FILE   The last highlighted file in the right file pane
# $FILES_SELECTED             A comma separated list of selected files
#
# After creating the script, you have to set the mode to executable for
# it to be ran. You can change the shebang to run any language on your
# computer (and then change the comments also).
#
"#;
