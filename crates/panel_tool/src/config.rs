use clap::Args;
use panel_time::{DateMathOptions, WeekStart};

pub const ENV_TZ: &str = "PANEL_TOOL_TZ";
pub const ENV_FISCAL_START_MONTH: &str = "PANEL_TOOL_FISCAL_START_MONTH";
pub const ENV_WEEK_START: &str = "PANEL_TOOL_WEEK_START";

/// Date-math settings shared by every command. Flags win over the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct TimeArgs {
    /// Time zone: IANA name, `utc`, or `browser` for the host zone
    #[arg(long, env = ENV_TZ, global = true)]
    pub tz: Option<String>,

    /// First month of the fiscal year, 0-based (0 = January)
    #[arg(
        long,
        env = ENV_FISCAL_START_MONTH,
        global = true,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=11),
    )]
    pub fiscal_start_month: u8,

    /// First day of the week: saturday, sunday or monday
    #[arg(
        long,
        env = ENV_WEEK_START,
        global = true,
        default_value = "sunday",
        value_parser = parse_week_start,
    )]
    pub week_start: WeekStart,

    /// Round `/unit` steps up to the end of the unit
    #[arg(long, global = true)]
    pub round_up: bool,
}

impl TimeArgs {
    pub fn options(&self) -> DateMathOptions {
        DateMathOptions {
            round_up: self.round_up,
            time_zone: self.tz.clone(),
            fiscal_year_start_month: self.fiscal_start_month,
            week_start: self.week_start,
        }
    }
}

fn parse_week_start(s: &str) -> Result<WeekStart, String> {
    WeekStart::from_name(s).ok_or_else(|| format!("expected saturday, sunday or monday, got {s:?}"))
}
