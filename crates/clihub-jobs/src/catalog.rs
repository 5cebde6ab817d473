//! Catalog of CLI commands that jobs may run.
//!
//! The catalog is the single source of truth for both request validation
//! (the allow-list and required arguments) and the command documentation
//! served by the API.

use serde::Serialize;

/// A positional argument accepted by a command.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArgSpec {
    /// Argument name as shown in documentation.
    pub name: &'static str,
    /// What the argument means.
    pub description: &'static str,
    /// Whether the command is rejected without it.
    pub required: bool,
}

/// A flag accepted by a command.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlagSpec {
    /// Flag spelling, e.g. `"--name"`.
    pub name: &'static str,
    /// What the flag does.
    pub description: &'static str,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommandSpec {
    /// Command name as passed in a job request.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Positional arguments.
    pub args: &'static [ArgSpec],
    /// Supported flags.
    pub flags: &'static [FlagSpec],
    /// Example invocations.
    pub examples: &'static [&'static str],
}

/// Every command the service will execute.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "new",
        description: "Start a new plan",
        args: &[],
        flags: &[FlagSpec {
            name: "--name",
            description: "Name for the new plan",
        }],
        examples: &["new", "new --name auth-refactor"],
    },
    CommandSpec {
        name: "tell",
        description: "Send a prompt to the current plan",
        args: &[ArgSpec {
            name: "prompt",
            description: "The task or instruction to work on",
            required: true,
        }],
        flags: &[FlagSpec {
            name: "--file",
            description: "Read the prompt from a file",
        }],
        examples: &["tell \"add a health endpoint to the server\""],
    },
    CommandSpec {
        name: "chat",
        description: "Ask a question without making changes",
        args: &[ArgSpec {
            name: "prompt",
            description: "The question to ask",
            required: true,
        }],
        flags: &[],
        examples: &["chat \"how does the retry loop work?\""],
    },
    CommandSpec {
        name: "continue",
        description: "Continue the current plan",
        args: &[],
        flags: &[],
        examples: &["continue"],
    },
    CommandSpec {
        name: "load",
        description: "Load files or directories into context",
        args: &[ArgSpec {
            name: "path",
            description: "File or directory to load",
            required: true,
        }],
        flags: &[],
        examples: &["load src/main.rs", "load src --recursive"],
    },
    CommandSpec {
        name: "ls",
        description: "List everything in context",
        args: &[],
        flags: &[],
        examples: &["ls"],
    },
    CommandSpec {
        name: "plans",
        description: "List plans",
        args: &[],
        flags: &[],
        examples: &["plans"],
    },
    CommandSpec {
        name: "cd",
        description: "Set the current plan",
        args: &[ArgSpec {
            name: "plan",
            description: "Name or index of the plan",
            required: true,
        }],
        flags: &[],
        examples: &["cd auth-refactor"],
    },
    CommandSpec {
        name: "apply",
        description: "Apply pending changes to project files",
        args: &[],
        flags: &[FlagSpec {
            name: "--yes",
            description: "Skip the confirmation prompt",
        }],
        examples: &["apply", "apply --yes"],
    },
    CommandSpec {
        name: "build",
        description: "Build pending changes into file edits",
        args: &[],
        flags: &[],
        examples: &["build"],
    },
    CommandSpec {
        name: "log",
        description: "Show plan history",
        args: &[],
        flags: &[],
        examples: &["log"],
    },
    CommandSpec {
        name: "convo",
        description: "Show the conversation history",
        args: &[],
        flags: &[],
        examples: &["convo"],
    },
    CommandSpec {
        name: "diff",
        description: "Show pending changes as a diff",
        args: &[],
        flags: &[],
        examples: &["diff"],
    },
    CommandSpec {
        name: "current",
        description: "Show the current plan",
        args: &[],
        flags: &[],
        examples: &["current"],
    },
    CommandSpec {
        name: "config",
        description: "Show plan configuration",
        args: &[],
        flags: &[],
        examples: &["config"],
    },
    CommandSpec {
        name: "models",
        description: "Show model settings",
        args: &[],
        flags: &[],
        examples: &["models"],
    },
    CommandSpec {
        name: "set-config",
        description: "Update plan configuration",
        args: &[],
        flags: &[],
        examples: &["set-config auto-apply true"],
    },
    CommandSpec {
        name: "set-model",
        description: "Update model settings",
        args: &[],
        flags: &[],
        examples: &["set-model planner gpt-5"],
    },
    CommandSpec {
        name: "branches",
        description: "List plan branches",
        args: &[],
        flags: &[],
        examples: &["branches"],
    },
    CommandSpec {
        name: "checkout",
        description: "Switch to or create a branch",
        args: &[ArgSpec {
            name: "branch",
            description: "Branch to switch to",
            required: true,
        }],
        flags: &[],
        examples: &["checkout experiment"],
    },
    CommandSpec {
        name: "archive",
        description: "Archive a plan",
        args: &[],
        flags: &[],
        examples: &["archive"],
    },
    CommandSpec {
        name: "unarchive",
        description: "Unarchive a plan",
        args: &[],
        flags: &[],
        examples: &["unarchive"],
    },
    CommandSpec {
        name: "usage",
        description: "Show credits usage",
        args: &[],
        flags: &[],
        examples: &["usage"],
    },
    CommandSpec {
        name: "version",
        description: "Show the CLI version",
        args: &[],
        flags: &[],
        examples: &["version"],
    },
    CommandSpec {
        name: "debug",
        description: "Repeatedly build and fix until a command passes",
        args: &[ArgSpec {
            name: "command",
            description: "Shell command that must succeed",
            required: false,
        }],
        flags: &[],
        examples: &["debug \"cargo test\""],
    },
    CommandSpec {
        name: "stop",
        description: "Stop the current model stream",
        args: &[],
        flags: &[],
        examples: &["stop"],
    },
    CommandSpec {
        name: "rewind",
        description: "Rewind the plan to an earlier state",
        args: &[ArgSpec {
            name: "steps",
            description: "Number of steps to rewind",
            required: false,
        }],
        flags: &[],
        examples: &["rewind", "rewind 2"],
    },
    CommandSpec {
        name: "reject",
        description: "Reject pending changes",
        args: &[],
        flags: &[],
        examples: &["reject"],
    },
    CommandSpec {
        name: "clear",
        description: "Clear all context",
        args: &[],
        flags: &[],
        examples: &["clear"],
    },
    CommandSpec {
        name: "summary",
        description: "Show the latest plan summary",
        args: &[],
        flags: &[],
        examples: &["summary"],
    },
    CommandSpec {
        name: "delete-plan",
        description: "Delete a plan",
        args: &[ArgSpec {
            name: "plan",
            description: "Name or index of the plan to delete",
            required: true,
        }],
        flags: &[],
        examples: &["delete-plan old-experiment"],
    },
];

/// Look up a command by exact name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Check whether a command is on the allow-list.
pub fn is_allowed(name: &str) -> bool {
    find(name).is_some()
}
