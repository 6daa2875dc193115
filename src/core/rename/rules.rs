//! Ordered substitution and rename tables.
//!
//! Order is significant: content rules are applied one after another to the
//! already-rewritten text, so longer and more specific patterns must precede
//! the generic ones they contain. A later, shorter rule whose `from` occurs
//! inside an earlier rule's `to` will rewrite that output again; table authors
//! must avoid such pairs.
//!
//! A single pass is not idempotent for every input. Rules whose pattern
//! carries its own delimiters (`" openclaw "`, `"(openclaw"`, `"-openclaw"`)
//! consume those delimiters, so in `" openclaw openclaw "` the second
//! occurrence has lost its leading space and only matches on a later pass.

use serde::{Deserialize, Serialize};

/// Literal find/replace pair applied globally to file text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRule {
    pub from: String,
    pub to: String,
}

/// Exact-basename mapping applied to a file or directory's own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

/// All substitution and rename rules for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub content: Vec<ContentRule>,
    pub files: Vec<RenameRule>,
    pub dirs: Vec<RenameRule>,
}

impl RuleTable {
    /// The built-in `openclaw` → `zoidbergbot` table.
    pub fn builtin() -> Self {
        Self {
            content: builtin_content_rules(),
            files: builtin_file_renames(),
            dirs: builtin_dir_renames(),
        }
    }

    pub fn resolve_file(&self, name: &str) -> Option<&str> {
        resolve_rename(name, &self.files)
    }

    pub fn resolve_dir(&self, name: &str) -> Option<&str> {
        resolve_rename(name, &self.dirs)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Exact, case-sensitive, first-match-wins lookup of `name` in `table`.
pub fn resolve_rename<'a>(name: &str, table: &'a [RenameRule]) -> Option<&'a str> {
    table
        .iter()
        .find(|rule| rule.from == name)
        .map(|rule| rule.to.as_str())
}

// ============================================================================
// Built-in tables
// ============================================================================

const CONTENT_REPLACEMENTS: &[(&str, &str)] = &[
    // Package scope (before generic openclaw)
    ("@openclaw/", "@zoidbergbot/"),
    // URLs and domains
    ("docs.openclaw.ai", "docs.zoidbergbot.ai"),
    ("openclaw.ai", "zoidbergbot.ai"),
    ("github.com/openclaw/openclaw", "github.com/zoidbergbot/zoidbergbot"),
    ("github.com/openclaw", "github.com/zoidbergbot"),
    // Bundle identifiers
    ("ai.openclaw.shared", "ai.zoidbergbot.shared"),
    ("ai.openclaw.mac.deeplink", "ai.zoidbergbot.mac.deeplink"),
    ("ai.openclaw.mac", "ai.zoidbergbot.mac"),
    ("ai.openclaw.ios.tests", "ai.zoidbergbot.ios.tests"),
    ("ai.openclaw.ios", "ai.zoidbergbot.ios"),
    ("ai.openclaw.android", "ai.zoidbergbot.android"),
    ("ai.openclaw", "ai.zoidbergbot"),
    // Bonjour service
    ("_openclaw-gw._tcp", "_zoidbergbot-gw._tcp"),
    // Deep link scheme
    ("openclaw://", "zoidbergbot://"),
    // Config paths
    ("~/.openclaw-", "~/.zoidbergbot-"),
    ("~/.openclaw/", "~/.zoidbergbot/"),
    ("~/.openclaw", "~/.zoidbergbot"),
    (".openclaw/", ".zoidbergbot/"),
    (".openclaw-", ".zoidbergbot-"),
    (r#"".openclaw""#, r#"".zoidbergbot""#),
    (r#"".openclaw\\"#, r#"".zoidbergbot\\"#),
    ("`.openclaw`", "`.zoidbergbot`"),
    // Client IDs
    ("openclaw-ios", "zoidbergbot-ios"),
    ("openclaw-android", "zoidbergbot-android"),
    // Config file names
    ("openclaw.json", "zoidbergbot.json"),
    // Plugin SDK imports
    ("openclaw/plugin-sdk", "zoidbergbot/plugin-sdk"),
    ("openclaw/cli-entry", "zoidbergbot/cli-entry"),
    // Environment variables
    ("OPENCLAW_", "ZOIDBERGBOT_"),
    // Service names
    ("openclaw-gateway", "zoidbergbot-gateway"),
    ("openclaw-auth-monitor", "zoidbergbot-auth-monitor"),
    ("openclaw-mac", "zoidbergbot-mac"),
    ("openclaw-macos", "zoidbergbot-macos"),
    ("openclaw-cli", "zoidbergbot-cli"),
    // Type names, specific types first
    ("OpenClawProtocol", "ZoidbergBotProtocol"),
    ("OpenClawConfig", "ZoidbergBotConfig"),
    ("OpenClawPluginApi", "ZoidbergBotPluginApi"),
    ("OpenClawPlugin", "ZoidbergBotPlugin"),
    ("OpenClawKit", "ZoidbergBotKit"),
    ("OpenClawNode", "ZoidbergBotNode"),
    ("OpenClawTests", "ZoidbergBotTests"),
    ("OpenClaw", "ZoidbergBot"),
    // Docker images
    ("openclaw/sandbox", "zoidbergbot/sandbox"),
    ("openclaw/browser", "zoidbergbot/browser"),
    // Tagline
    ("All your chats, one OpenClaw.", "All your chats, one ZoidbergBot."),
    // Android theme
    ("Theme.OpenClawNode", "Theme.ZoidbergBotNode"),
    // CLI commands in docs and strings
    ("openclaw pairing", "zoidbergbot pairing"),
    ("openclaw plugins", "zoidbergbot plugins"),
    ("openclaw voicecall", "zoidbergbot voicecall"),
    ("openclaw models", "zoidbergbot models"),
    ("openclaw gateway", "zoidbergbot gateway"),
    ("openclaw config", "zoidbergbot config"),
    ("openclaw channels", "zoidbergbot channels"),
    ("openclaw agent", "zoidbergbot agent"),
    ("openclaw message", "zoidbergbot message"),
    ("openclaw doctor", "zoidbergbot doctor"),
    ("openclaw login", "zoidbergbot login"),
    ("openclaw status", "zoidbergbot status"),
    ("openclaw send", "zoidbergbot send"),
    ("openclaw tui", "zoidbergbot tui"),
    // camelCase variables
    ("openclawConfig", "zoidbergbotConfig"),
    ("openclawPollId", "zoidbergbotPollId"),
    ("openclawHome", "zoidbergbotHome"),
    ("openclawDir", "zoidbergbotDir"),
    ("openclawPath", "zoidbergbotPath"),
    // Temp directories
    ("\"openclaw-", "\"zoidbergbot-"),
    ("'openclaw-", "'zoidbergbot-"),
    ("`openclaw-", "`zoidbergbot-"),
    // More CLI commands
    ("openclaw help", "zoidbergbot help"),
    ("openclaw start", "zoidbergbot start"),
    ("openclaw run", "zoidbergbot run"),
    ("openclaw hooks", "zoidbergbot hooks"),
    ("openclaw sandbox", "zoidbergbot sandbox"),
    ("openclaw browser", "zoidbergbot browser"),
    ("openclaw skills", "zoidbergbot skills"),
    ("openclaw canvas", "zoidbergbot canvas"),
    ("openclaw node", "zoidbergbot node"),
    ("openclaw security", "zoidbergbot security"),
    ("openclaw approvals", "zoidbergbot approvals"),
    ("openclaw dns", "zoidbergbot dns"),
    ("openclaw update", "zoidbergbot update"),
    ("openclaw reset", "zoidbergbot reset"),
    ("openclaw logs", "zoidbergbot logs"),
    ("openclaw cron", "zoidbergbot cron"),
    ("openclaw tool", "zoidbergbot tool"),
    ("openclaw webhooks", "zoidbergbot webhooks"),
    ("openclaw acp", "zoidbergbot acp"),
    ("openclaw profile", "zoidbergbot profile"),
    // Package managers
    ("npm i -g openclaw", "npm i -g zoidbergbot"),
    ("npm install -g openclaw", "npm install -g zoidbergbot"),
    ("npm i openclaw", "npm i zoidbergbot"),
    ("npx openclaw", "npx zoidbergbot"),
    ("pnpm openclaw", "pnpm zoidbergbot"),
    ("bunx openclaw", "bunx zoidbergbot"),
    // Test helpers
    ("OpenClawIPC", "ZoidbergBotIPC"),
    // Android package declarations
    ("package ai.openclaw.android", "package ai.zoidbergbot.android"),
    ("import ai.openclaw.android", "import ai.zoidbergbot.android"),
    ("ai.openclaw.android.", "ai.zoidbergbot.android."),
    // Android class names
    ("OpenClawCanvasA2UIAction", "ZoidbergBotCanvasA2UIAction"),
    ("OpenClawProtocolConstants", "ZoidbergBotProtocolConstants"),
    ("OpenClawTheme", "ZoidbergBotTheme"),
    // JavaScript globals and path segments
    ("openclawA2UI", "zoidbergbotA2UI"),
    ("__openclaw__", "__zoidbergbot__"),
    ("openclaw@", "zoidbergbot@"),
    // More CLI variations
    ("openclaw --", "zoidbergbot --"),
    ("openclaw)", "zoidbergbot)"),
    ("(openclaw", "(zoidbergbot"),
    // Bot usernames in fixtures
    ("openclaw_bot", "zoidbergbot_bot"),
    ("openclawbot", "zoidbergbotbot"),
    // Escaped brackets in test regexes
    (r"\\[openclaw\\]", r"\\[zoidbergbot\\]"),
    // Bonjour/DNS
    ("openclaw-gw", "zoidbergbot-gw"),
    // Canvas/A2UI
    ("\"openclaw\"", "\"zoidbergbot\""),
    ("'openclaw'", "'zoidbergbot'"),
    // Canvas/A2UI JavaScript globals
    ("openclawCanvasA2UIAction", "zoidbergbotCanvasA2UIAction"),
    ("openclawPostMessage", "zoidbergbotPostMessage"),
    ("openclawSendUserAction", "zoidbergbotSendUserAction"),
    ("openclawBridge", "zoidbergbotBridge"),
    // Service names without dash
    ("openclawgw", "zoidbergbotgw"),
    // Custom elements and animations
    ("openclaw-a2ui", "zoidbergbot-a2ui"),
    ("openclaw-grid", "zoidbergbot-grid"),
    ("openclaw-glow", "zoidbergbot-glow"),
    ("openclaw-canvas", "zoidbergbot-canvas"),
    ("openclaw-status", "zoidbergbot-status"),
    ("<openclaw-", "<zoidbergbot-"),
    ("</openclaw-", "</zoidbergbot-"),
    // Test data
    ("friends-of-openclaw", "friends-of-zoidbergbot"),
    // Remaining standalone patterns
    ("-openclaw", "-zoidbergbot"),
    ("openclaw-", "zoidbergbot-"),
    // Word-boundary regexes
    (r"\\bopenclaw\\b", r"\\bzoidbergbot\\b"),
    // Mentions
    ("@openclaw", "@zoidbergbot"),
    // macOS test directories
    ("OpenClawIPCTests", "ZoidbergBotIPCTests"),
    // Generic lowercase, must come last
    ("\"openclaw\"", "\"zoidbergbot\""),
    ("'openclaw'", "'zoidbergbot'"),
    ("`openclaw`", "`zoidbergbot`"),
    ("/openclaw", "/zoidbergbot"),
    ("openclaw:", "zoidbergbot:"),
    ("openclaw.", "zoidbergbot."),
    // Standalone
    (" openclaw ", " zoidbergbot "),
    ("(openclaw)", "(zoidbergbot)"),
    ("[openclaw]", "[zoidbergbot]"),
];

const FILE_RENAMES: &[(&str, &str)] = &[
    ("openclaw.mjs", "zoidbergbot.mjs"),
    (
        "openclaw-auth-monitor.service",
        "zoidbergbot-auth-monitor.service",
    ),
    ("openclaw-auth-monitor.timer", "zoidbergbot-auth-monitor.timer"),
];

const DIR_RENAMES: &[(&str, &str)] = &[
    ("OpenClawKit", "ZoidbergBotKit"),
    ("OpenClawProtocol", "ZoidbergBotProtocol"),
    ("OpenClaw", "ZoidbergBot"),
];

pub fn builtin_content_rules() -> Vec<ContentRule> {
    CONTENT_REPLACEMENTS
        .iter()
        .map(|(from, to)| ContentRule {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect()
}

pub fn builtin_file_renames() -> Vec<RenameRule> {
    to_rename_rules(FILE_RENAMES)
}

pub fn builtin_dir_renames() -> Vec<RenameRule> {
    to_rename_rules(DIR_RENAMES)
}

fn to_rename_rules(pairs: &[(&str, &str)]) -> Vec<RenameRule> {
    pairs
        .iter()
        .map(|(from, to)| RenameRule {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect()
}
