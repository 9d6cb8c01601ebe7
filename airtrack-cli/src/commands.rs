//! Subcommands and their dispatch onto the tracker

use crate::output::Output;
use airtrack_core::core_identity::Registration;
use airtrack_core::core_store::model::{Airdrop, Completable, EntityId, Link, Testnet, Tool, Video};
use airtrack_core::core_store::query::{ListQuery, SortOption, StatusFilter};
use airtrack_core::core_store::store::{AirdropInput, TestnetInput, ToolInput, VideoInput};
use airtrack_core::{Tracked, Tracker};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::json;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account (requires an invite code) and log in
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        invite_code: Option<String>,
        /// Telegram handle, e.g. @alice
        #[arg(long)]
        telegram: Option<String>,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Summary counters for your airdrops and testnets
    Dashboard,

    /// Run the daily airdrop reset if it has not run today
    DailyCheck {
        /// Date to check against (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Manage airdrops
    #[command(subcommand)]
    Airdrop(AirdropCommand),

    /// Manage testnets
    #[command(subcommand)]
    Testnet(TestnetCommand),

    /// Manage tool bookmarks
    #[command(subcommand)]
    Tool(ToolCommand),

    /// Manage saved videos
    #[command(subcommand)]
    Video(VideoCommand),
}

/// Operations every record kind supports
#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// List your records
    List(ListArgs),
    /// List your pinned records
    Pinned,
    /// Show one record in full
    Show { id: String },
    /// Delete a record
    Delete { id: String },
    /// Toggle the pinned flag
    Pin { id: String },
    /// List categories
    Categories,
    /// Add a category
    AddCategory { name: String },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Exact category name, or "all"
    #[arg(long)]
    category: Option<String>,
    /// Case-insensitive text in title or description
    #[arg(long)]
    search: Option<String>,
    /// newest, oldest, alphabetical or pinned
    #[arg(long, default_value = "newest")]
    sort: SortOption,
    /// all, active or completed
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

impl ListArgs {
    fn to_query(&self) -> ListQuery {
        ListQuery {
            category: self.category.clone(),
            search: self.search.clone(),
            sort: self.sort,
            status: self.status,
        }
    }
}

/// Parse a `--link name=url` value
fn parse_link(value: &str) -> Result<Link, String> {
    match value.split_once('=') {
        Some((name, url)) => Ok(Link::new(name.trim(), url.trim())),
        None => Err(format!("expected NAME=URL, got '{}'", value)),
    }
}

#[derive(Args, Debug, Default)]
pub struct AirdropFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Link as NAME=URL; repeat for several. Replaces existing links on edit
    #[arg(long = "link", value_parser = parse_link)]
    links: Vec<Link>,
    #[arg(long)]
    funding: Option<String>,
    #[arg(long)]
    rewards: Option<String>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    work: Option<String>,
}

impl AirdropFields {
    fn merge_into(self, base: AirdropInput) -> AirdropInput {
        AirdropInput {
            title: self.title.unwrap_or(base.title),
            category: self.category.unwrap_or(base.category),
            description: self.description.unwrap_or(base.description),
            links: if self.links.is_empty() { base.links } else { self.links },
            funding_amount: self.funding.unwrap_or(base.funding_amount),
            rewards: self.rewards.unwrap_or(base.rewards),
            time_commitment: self.time.unwrap_or(base.time_commitment),
            work_required: self.work.unwrap_or(base.work_required),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct TestnetFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Link as NAME=URL; repeat for several. Replaces existing links on edit
    #[arg(long = "link", value_parser = parse_link)]
    links: Vec<Link>,
    /// Percentage, capped at 100
    #[arg(long)]
    progress: Option<u8>,
    #[arg(long)]
    rewards: Option<String>,
}

impl TestnetFields {
    fn merge_into(self, base: TestnetInput) -> TestnetInput {
        TestnetInput {
            title: self.title.unwrap_or(base.title),
            category: self.category.unwrap_or(base.category),
            description: self.description.unwrap_or(base.description),
            links: if self.links.is_empty() { base.links } else { self.links },
            progress: self.progress.unwrap_or(base.progress),
            rewards: self.rewards.unwrap_or(base.rewards),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ToolFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    link: Option<String>,
}

impl ToolFields {
    fn merge_into(self, base: ToolInput) -> ToolInput {
        ToolInput {
            title: self.title.unwrap_or(base.title),
            category: self.category.unwrap_or(base.category),
            description: self.description.unwrap_or(base.description),
            link: self.link.unwrap_or(base.link),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct VideoFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// YouTube video id or URL
    #[arg(long)]
    video: Option<String>,
}

impl VideoFields {
    fn merge_into(self, base: VideoInput) -> VideoInput {
        VideoInput {
            title: self.title.unwrap_or(base.title),
            category: self.category.unwrap_or(base.category),
            description: self.description.unwrap_or(base.description),
            video: self.video.unwrap_or(base.video),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AirdropCommand {
    /// Add an airdrop
    Add(AirdropFields),
    /// Edit an airdrop; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: AirdropFields,
    },
    /// Toggle the completed flag
    Complete { id: String },
    #[command(flatten)]
    Record(RecordCommand),
}

#[derive(Subcommand, Debug)]
pub enum TestnetCommand {
    /// Add a testnet
    Add(TestnetFields),
    /// Edit a testnet; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: TestnetFields,
    },
    /// Toggle the completed flag
    Complete { id: String },
    /// Set progress (0-100)
    Progress { id: String, value: u8 },
    #[command(flatten)]
    Record(RecordCommand),
}

#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Add a tool bookmark
    Add(ToolFields),
    /// Edit a tool; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: ToolFields,
    },
    #[command(flatten)]
    Record(RecordCommand),
}

#[derive(Subcommand, Debug)]
pub enum VideoCommand {
    /// Save a video
    Add(VideoFields),
    /// Edit a video; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: VideoFields,
    },
    #[command(flatten)]
    Record(RecordCommand),
}

pub async fn run(tracker: &mut Tracker, command: Command, out: &Output) -> Result<()> {
    match command {
        Command::Register {
            username,
            email,
            password,
            invite_code,
            telegram,
        } => {
            let form = Registration {
                username: username.unwrap_or_default(),
                email: email.unwrap_or_default(),
                password: password.unwrap_or_default(),
                invite_code: invite_code.unwrap_or_default(),
                telegram_username: telegram.unwrap_or_default(),
            };
            let user = tracker.register(form).await?;
            out.message(
                &format!("Registered and logged in as {}", user.username),
                json!(user),
            )
        }
        Command::Login { email, password } => {
            let user = tracker
                .login(&email.unwrap_or_default(), &password.unwrap_or_default())
                .await?;
            out.message(&format!("Welcome back, {}!", user.username), json!(user))
        }
        Command::Logout => {
            tracker.logout()?;
            out.message("Logged out", json!({ "loggedOut": true }))
        }
        Command::Whoami => match tracker.current_user() {
            Some(user) => {
                let role = if user.is_admin { " (admin)" } else { "" };
                out.message(&format!("{} <{}>{}", user.username, user.email, role), json!(user))
            }
            None => out.message("Not logged in", json!(null)),
        },
        Command::Dashboard => out.dashboard(&tracker.dashboard()?),
        Command::DailyCheck { date } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let ran = tracker.daily_check(today)?;
            let text = if ran {
                format!("Daily reset ran for {}", today)
            } else {
                format!("Daily reset already ran for {}", today)
            };
            out.message(&text, json!({ "date": today, "ran": ran }))
        }
        Command::Airdrop(cmd) => run_airdrop(tracker, cmd, out),
        Command::Testnet(cmd) => run_testnet(tracker, cmd, out),
        Command::Tool(cmd) => run_tool(tracker, cmd, out),
        Command::Video(cmd) => run_video(tracker, cmd, out),
    }
}

fn run_airdrop(tracker: &mut Tracker, cmd: AirdropCommand, out: &Output) -> Result<()> {
    match cmd {
        AirdropCommand::Add(fields) => {
            let draft = fields.merge_into(AirdropInput::default());
            out.record(&tracker.submit::<Airdrop>(draft)?)
        }
        AirdropCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            let base = AirdropInput::from(&existing::<Airdrop>(tracker, &id)?);
            tracker.edit::<Airdrop>(&id, fields.merge_into(base))?;
            out.record(&existing::<Airdrop>(tracker, &id)?)
        }
        AirdropCommand::Complete { id } => toggle_completed::<Airdrop>(tracker, id, out),
        AirdropCommand::Record(cmd) => run_record::<Airdrop>(tracker, cmd, out),
    }
}

fn run_testnet(tracker: &mut Tracker, cmd: TestnetCommand, out: &Output) -> Result<()> {
    match cmd {
        TestnetCommand::Add(fields) => {
            let draft = fields.merge_into(TestnetInput::default());
            out.record(&tracker.submit::<Testnet>(draft)?)
        }
        TestnetCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            let base = TestnetInput::from(&existing::<Testnet>(tracker, &id)?);
            tracker.edit::<Testnet>(&id, fields.merge_into(base))?;
            out.record(&existing::<Testnet>(tracker, &id)?)
        }
        TestnetCommand::Complete { id } => toggle_completed::<Testnet>(tracker, id, out),
        TestnetCommand::Progress { id, value } => {
            let id = EntityId::new(id);
            if !tracker.update_progress(&id, value)? {
                bail!("testnet {} not found", id);
            }
            let testnet = existing::<Testnet>(tracker, &id)?;
            out.message(
                &format!("{}: {}%", testnet.title, testnet.progress),
                json!(testnet),
            )
        }
        TestnetCommand::Record(cmd) => run_record::<Testnet>(tracker, cmd, out),
    }
}

fn run_tool(tracker: &mut Tracker, cmd: ToolCommand, out: &Output) -> Result<()> {
    match cmd {
        ToolCommand::Add(fields) => {
            let draft = fields.merge_into(ToolInput::default());
            out.record(&tracker.submit::<Tool>(draft)?)
        }
        ToolCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            let base = ToolInput::from(&existing::<Tool>(tracker, &id)?);
            tracker.edit::<Tool>(&id, fields.merge_into(base))?;
            out.record(&existing::<Tool>(tracker, &id)?)
        }
        ToolCommand::Record(cmd) => run_record::<Tool>(tracker, cmd, out),
    }
}

fn run_video(tracker: &mut Tracker, cmd: VideoCommand, out: &Output) -> Result<()> {
    match cmd {
        VideoCommand::Add(fields) => {
            let draft = fields.merge_into(VideoInput::default());
            out.record(&tracker.submit::<Video>(draft)?)
        }
        VideoCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            let base = VideoInput::from(&existing::<Video>(tracker, &id)?);
            tracker.edit::<Video>(&id, fields.merge_into(base))?;
            out.record(&existing::<Video>(tracker, &id)?)
        }
        VideoCommand::Record(cmd) => run_record::<Video>(tracker, cmd, out),
    }
}

/// The current user's record with `id`, or an error naming the kind
fn existing<T: Tracked>(tracker: &Tracker, id: &EntityId) -> Result<T> {
    match tracker.get::<T>(id)? {
        Some(record) => Ok(record),
        None => bail!("{} {} not found", T::KIND, id),
    }
}

fn toggle_completed<T: Tracked + Completable>(
    tracker: &mut Tracker,
    id: String,
    out: &Output,
) -> Result<()> {
    let id = EntityId::new(id);
    match tracker.toggle_completed::<T>(&id)? {
        Some(true) => out.message(
            &format!("{} marked as completed", T::KIND.label()),
            json!({ "id": id, "completed": true }),
        ),
        Some(false) => out.message(
            &format!("{} marked as incomplete", T::KIND.label()),
            json!({ "id": id, "completed": false }),
        ),
        None => bail!("{} {} not found", T::KIND, id),
    }
}

fn run_record<T: Tracked>(tracker: &mut Tracker, cmd: RecordCommand, out: &Output) -> Result<()> {
    match cmd {
        RecordCommand::List(args) => out.records(&tracker.list::<T>(&args.to_query())?),
        RecordCommand::Pinned => out.records(&tracker.pinned::<T>()?),
        RecordCommand::Show { id } => {
            let record = existing::<T>(tracker, &EntityId::new(id))?;
            out.detail(&record)
        }
        RecordCommand::Delete { id } => {
            let id = EntityId::new(id);
            if !tracker.delete::<T>(&id)? {
                bail!("{} {} not found", T::KIND, id);
            }
            out.message(
                &format!("{} deleted", T::KIND.label()),
                json!({ "id": id, "deleted": true }),
            )
        }
        RecordCommand::Pin { id } => {
            let id = EntityId::new(id);
            match tracker.toggle_pinned::<T>(&id)? {
                Some(pinned) => {
                    let verb = if pinned { "pinned" } else { "unpinned" };
                    out.message(
                        &format!("{} {}", T::KIND.label(), verb),
                        json!({ "id": id, "pinned": pinned }),
                    )
                }
                None => bail!("{} {} not found", T::KIND, id),
            }
        }
        RecordCommand::Categories => {
            let categories = tracker.categories::<T>()?;
            if out.is_json() {
                return out.detail(&categories);
            }
            for category in categories {
                println!("{}", category.name);
            }
            Ok(())
        }
        RecordCommand::AddCategory { name } => {
            let category = tracker.add_category::<T>(&name)?;
            out.message(
                &format!("Category '{}' added", category.name),
                json!(category),
            )
        }
    }
}
