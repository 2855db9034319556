use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dk", about = concat!("docket v", env!("CARGO_PKG_VERSION"), " - deadlines and lists in plain JSON"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track deadlines
    Deadline(DeadlineCmd),
    /// Manage named lists in the active file
    List(ListCmd),
    /// Edit items of a list
    Item(ItemCmd),
    /// Show, restore or empty the trash
    Trash(TrashCmd),
    /// Open, switch and close list files
    File(FileCmd),
    /// Import a text file (one item per line) into a new list file
    Import(ImportArgs),
    /// Export one list as text, one item per line
    Export(ExportArgs),
    /// Show or create the config file
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DeadlineCmd {
    #[command(subcommand)]
    pub action: Option<DeadlineAction>,
}

#[derive(Subcommand)]
pub enum DeadlineAction {
    /// List deadlines, earliest first (default)
    List,
    /// Add a deadline
    Add(DeadlineAddArgs),
    /// Change a deadline (fields not given are kept)
    Edit(DeadlineEditArgs),
    /// Delete a deadline
    Rm(DeadlineIndexArg),
    /// Redraw the table periodically and notify about urgent deadlines
    Watch(WatchArgs),
}

#[derive(Args)]
pub struct DeadlineAddArgs {
    /// What is due
    pub name: String,
    /// Due date: MM-DD, or YYYY-MM-DD
    pub date: String,
    /// Year for an MM-DD date (default: current year)
    #[arg(long)]
    pub year: Option<String>,
    /// Due time, HH:MM (default: 23:59)
    #[arg(long)]
    pub time: Option<String>,
    /// Days needed to finish; enables urgency notifications
    #[arg(long)]
    pub days: Option<String>,
}

#[derive(Args)]
pub struct DeadlineEditArgs {
    /// Position as shown by `dk deadline list`
    pub index: usize,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New due date: MM-DD, or YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Year for an MM-DD date
    #[arg(long)]
    pub year: Option<String>,
    /// New due time, HH:MM
    #[arg(long)]
    pub time: Option<String>,
    /// New days needed
    #[arg(long, conflicts_with = "clear_days")]
    pub days: Option<String>,
    /// Stop tracking days needed
    #[arg(long)]
    pub clear_days: bool,
}

#[derive(Args)]
pub struct DeadlineIndexArg {
    /// Position as shown by `dk deadline list`
    pub index: usize,
}

#[derive(Args)]
pub struct WatchArgs {
    /// Render once and exit
    #[arg(long)]
    pub once: bool,
    /// Seconds between refreshes (default: from config)
    #[arg(long)]
    pub interval: Option<u64>,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListCmd {
    #[command(subcommand)]
    pub action: Option<ListAction>,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Show lists and their items (default)
    Show(ListShowArgs),
    /// Create an empty list
    New(ListNameArg),
    /// Delete a list, moving its items to the trash
    Rm(ListNameArg),
    /// Rename a list
    Rename(ListRenameArgs),
}

#[derive(Args)]
pub struct ListShowArgs {
    /// Only this list
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ListNameArg {
    /// List name
    pub name: String,
}

#[derive(Args)]
pub struct ListRenameArgs {
    /// Current name
    pub old: String,
    /// New name
    pub new: String,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ItemCmd {
    #[command(subcommand)]
    pub action: ItemAction,
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Append an item
    Add(ItemAddArgs),
    /// Replace an item's text
    Edit(ItemEditArgs),
    /// Move an item to the trash
    Rm(ItemRef),
    /// Swap an item with the one above it
    Up(ItemRef),
    /// Swap an item with the one below it
    Down(ItemRef),
    /// Move an item to the end of another list
    Mv(ItemMvArgs),
    /// Move an item to another position in the same list
    Reorder(ItemReorderArgs),
}

#[derive(Args)]
pub struct ItemAddArgs {
    /// List name
    pub list: String,
    /// Item text
    pub text: String,
}

#[derive(Args)]
pub struct ItemEditArgs {
    /// List name
    pub list: String,
    /// Item position (0-indexed)
    pub index: usize,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct ItemRef {
    /// List name
    pub list: String,
    /// Item position (0-indexed)
    pub index: usize,
}

#[derive(Args)]
pub struct ItemMvArgs {
    /// Source list
    pub list: String,
    /// Item position (0-indexed)
    pub index: usize,
    /// Target list
    pub target: String,
}

#[derive(Args)]
pub struct ItemReorderArgs {
    /// List name
    pub list: String,
    /// Current position (0-indexed)
    pub from: usize,
    /// New position (0-indexed)
    pub to: usize,
}

// ---------------------------------------------------------------------------
// Trash
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TrashCmd {
    #[command(subcommand)]
    pub action: Option<TrashAction>,
}

#[derive(Subcommand)]
pub enum TrashAction {
    /// List trashed items with their origin (default)
    Show,
    /// Put an item back into its original list
    Restore(TrashRestoreArgs),
    /// Permanently delete everything in the trash
    Clear,
}

#[derive(Args)]
pub struct TrashRestoreArgs {
    /// Trash position (0-indexed)
    pub index: usize,
    /// List to use if the original one no longer exists (default: first list)
    #[arg(long)]
    pub to: Option<String>,
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct FileCmd {
    #[command(subcommand)]
    pub action: Option<FileAction>,
}

#[derive(Subcommand)]
pub enum FileAction {
    /// List open files, the active one first (default)
    List,
    /// Create a new list file and make it active
    New(FilePathArg),
    /// Open a list file and make it active
    Open(FilePathArg),
    /// Save the active document under a new path
    SaveAs(FilePathArg),
    /// Make another open file active
    Switch(FilePathArg),
    /// Close an open file (default: the active one)
    Close(FileCloseArgs),
}

#[derive(Args)]
pub struct FilePathArg {
    /// Path to the JSON list file
    pub path: String,
}

#[derive(Args)]
pub struct FileCloseArgs {
    /// Path to the JSON list file
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ImportArgs {
    /// Text file to read
    pub txt: String,
    /// JSON list file to create (becomes the active file)
    #[arg(value_name = "JSON")]
    pub output: String,
    /// Overwrite the JSON file if it already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// List to export
    pub list: String,
    /// Text file to write
    pub txt: String,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file path (default)
    Path,
    /// Write a config file with every default spelled out
    Init(ConfigInitArgs),
}

#[derive(Args)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
