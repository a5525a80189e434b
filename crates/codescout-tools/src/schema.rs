//! Tool definitions advertised to the model
//!
//! Names here must match the variants `ToolRequest::parse` accepts. Every
//! schema requires `intention`: the free-text rationale shown at the
//! approval prompt and forwarded to the summarizer.

use codescout_llm::LlmTool;
use serde_json::json;

pub fn tool_definitions() -> Vec<LlmTool> {
    vec![
        LlmTool {
            name: "directory".to_string(),
            description: "Get the directory structure at the given path, recursively. \
                Use it for an overview of the project layout and to filter files and \
                folders. Entries carry size and last-modified metadata."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "intention": {
                        "type": "string",
                        "description": "A clear, specific statement of what you aim to learn from this call"
                    },
                    "path": {
                        "type": "string",
                        "description": "Directory to scan, relative to the project root (default: the root)"
                    },
                    "max_depth": {
                        "type": "integer",
                        "description": "Maximum entry depth; the scanned directory is depth 0. Negative or absent means unbounded"
                    },
                    "additional_exclude_dirs": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Directory names to exclude beyond the defaults (.git, node_modules, target, ...)"
                    },
                    "file_filter": {
                        "type": "string",
                        "description": "Glob on file names, e.g. '*.rs'"
                    },
                    "hide_empty_folder": {
                        "type": "boolean",
                        "description": "Hide folders with no matching files and no non-empty subfolders"
                    }
                },
                "required": ["intention"]
            }),
        },
        LlmTool {
            name: "tags".to_string(),
            description: "Symbol index over the codebase via universal-ctags. Always run \
                the 'generate_tags' action for a path before filtering it. The 'filter' \
                action matches tags by symbol name (optionally a regex) and/or kind \
                (c: classes, f: functions, v: variables, m: members/methods, s: structs, \
                e: enumerators, t: typedefs). Returns raw tab-separated tag lines. \
                Imports are not symbols."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "intention": {
                        "type": "string",
                        "description": "A clear, specific statement of what you aim to learn from this call"
                    },
                    "action": {
                        "type": "string",
                        "enum": ["generate_tags", "filter"],
                        "description": "generate_tags builds or refreshes the index; filter queries it"
                    },
                    "path": {
                        "type": "string",
                        "description": "File or directory the index covers, relative to the project root"
                    },
                    "symbol": {
                        "type": "string",
                        "description": "Symbol name to look up; omit (or '.') to match any"
                    },
                    "kind": {
                        "type": "string",
                        "description": "Single-character kind code to filter by"
                    },
                    "is_symbol_regex": {
                        "type": "boolean",
                        "description": "Treat symbol as a regular expression"
                    }
                },
                "required": ["intention", "action"]
            }),
        },
        LlmTool {
            name: "terminal".to_string(),
            description: "Run a terminal command scoped to the project. Recommended: rg \
                (with context lines), find, ls, cat. Narrow the scope in big codebases. \
                stdout and stderr are captured together; a non-zero exit still returns \
                the output."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "intention": {
                        "type": "string",
                        "description": "A clear, specific statement of what you aim to learn from this call"
                    },
                    "command": {
                        "type": "string",
                        "description": "The command to run"
                    },
                    "working_dir": {
                        "type": "string",
                        "description": "Working directory relative to the project root (default: the root)"
                    }
                },
                "required": ["intention", "command"]
            }),
        },
        LlmTool {
            name: "read_file".to_string(),
            description: "Read a file's contents as lines.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "intention": {
                        "type": "string",
                        "description": "A clear, specific statement of what you aim to learn from this call"
                    },
                    "path": {
                        "type": "string",
                        "description": "File path relative to the project root"
                    }
                },
                "required": ["intention", "path"]
            }),
        },
        LlmTool {
            name: "write_file".to_string(),
            description: "Create or overwrite a file with the provided content. Returns \
                the number of bytes written."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "intention": {
                        "type": "string",
                        "description": "A clear, specific statement of why this file is being written"
                    },
                    "path": {
                        "type": "string",
                        "description": "File path relative to the project root"
                    },
                    "content": {
                        "type": "string",
                        "description": "Full content to write"
                    }
                },
                "required": ["intention", "path", "content"]
            }),
        },
    ]
}
