use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vidyamitra", version, author, about = "A terminal study companion: marks, weekly planner and 3R journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup (student name, study time)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Weekly study planner
    Plan {
        #[command(subcommand)]
        action: PlanCommands,
    },
    /// Internal marks and attendance
    Marks {
        #[command(subcommand)]
        action: MarksCommands,
    },
    /// 3R journal: review, recall, revise
    Summary {
        #[command(subcommand)]
        action: SummaryCommands,
    },
    /// Study resources by subject and topic
    Resources {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Faculty views: class roster, subject and proctor dashboards
    Faculty {
        #[command(subcommand)]
        action: FacultyCommands,
    },
    /// Show performance and planner statistics
    Stats,
    /// Export a weekly summary to stdout
    Export {
        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Show plan entries
    Show {
        /// today, tomorrow, upcoming or all
        #[arg(long, default_value = "today")]
        tab: String,
    },
    /// Seed this week's sessions from weak subjects
    Generate,
    /// Add a study session by hand
    Add {
        /// Subject to study
        subject: String,
        /// Date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time, HH:MM
        #[arg(long)]
        time: Option<String>,
        /// Free-text duration
        #[arg(long, default_value = "1 hour")]
        duration: String,
    },
    /// Toggle completion of a plan entry
    Toggle {
        /// Entry id as shown by `plan show`
        id: String,
    },
}

/// Marks for one subject, shared by `marks set` and `faculty marks`.
#[derive(Args, Debug)]
pub struct MarksInput {
    /// Subject name
    pub subject: String,
    /// Internal total out of 70
    #[arg(long)]
    pub total: f64,
    #[arg(long, default_value = "0")]
    pub ia1: f64,
    #[arg(long, default_value = "0")]
    pub ia2: f64,
    #[arg(long, default_value = "0")]
    pub quiz: f64,
    #[arg(long, default_value = "0")]
    pub aat: f64,
    /// Class average, percent
    #[arg(long, default_value = "0")]
    pub class_avg: f64,
    /// Lectures attended
    #[arg(long, default_value = "0")]
    pub attended: u32,
    /// Lectures held
    #[arg(long, default_value = "0")]
    pub held: u32,
}

#[derive(Subcommand, Debug)]
pub enum MarksCommands {
    /// Record or update marks for a subject
    Set(MarksInput),
    /// Remove a subject
    Remove {
        subject: String,
    },
    /// Show every subject with its score
    List,
    /// Show subjects below the weak threshold
    Weak,
}

#[derive(Subcommand, Debug)]
pub enum SummaryCommands {
    /// Review: write today's study summary
    Write {
        /// Summary text
        text: Vec<String>,
    },
    /// Recall: show yesterday's summary
    Recall,
    /// Revise: list every summary, newest first
    Revise,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// Add a resource
    Add {
        subject: String,
        topic: String,
        title: String,
        url: String,
        /// video or article
        #[arg(long, default_value = "article")]
        kind: String,
    },
    /// List subjects, or topics and resources of one subject
    List {
        subject: Option<String>,
        /// Only this topic
        #[arg(long)]
        topic: Option<String>,
    },
    /// Search topics and titles
    Search {
        query: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FacultyCommands {
    /// Add a student to the roster, or rename one
    AddStudent {
        usn: String,
        name: String,
        #[arg(long, default_value = "0")]
        semester: u8,
    },
    /// Remove a student and their marks
    RemoveStudent {
        usn: String,
    },
    /// List the roster
    Students,
    /// Record marks for a student
    Marks {
        /// Student USN
        usn: String,
        #[command(flatten)]
        marks: MarksInput,
    },
    /// One subject across the class
    Subject {
        subject: String,
    },
    /// Every subject across the roster
    Proctor,
}
