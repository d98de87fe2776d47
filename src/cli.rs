use crate::config::QueryPolicy;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub command: String,
    pub scenario: Option<String>,
    pub format: OutputFormat,
    pub trace: bool,
    pub policy: Option<QueryPolicy>,
    pub max_cycles: Option<u64>,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut command = String::from("demo");
        let mut scenario = None;
        let mut format = OutputFormat::Text;
        let mut trace = false;
        let mut policy = None;
        let mut max_cycles = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--scenario" => {
                    scenario = Some(
                        iter.next()
                            .ok_or_else(|| "--scenario requires a value".to_string())?
                            .to_string(),
                    );
                    command = String::from("run");
                }
                "--format" => {
                    format = match *iter
                        .next()
                        .ok_or_else(|| "--format requires a value".to_string())?
                    {
                        "text" => OutputFormat::Text,
                        "json" => OutputFormat::Json,
                        other => return Err(format!("unknown format {other}")),
                    };
                }
                "--policy" => {
                    policy = match *iter
                        .next()
                        .ok_or_else(|| "--policy requires a value".to_string())?
                    {
                        "defer" => Some(QueryPolicy::Defer),
                        "reject" => Some(QueryPolicy::Reject),
                        other => return Err(format!("unknown policy {other}")),
                    };
                }
                "--max-cycles" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--max-cycles requires a value".to_string())?;
                    max_cycles = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| format!("invalid --max-cycles {value}"))?,
                    );
                }
                "--trace" => trace = true,
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                "run" => {
                    command = String::from("run");
                    if scenario.is_none() {
                        scenario = iter.next().map(|path| path.to_string());
                    }
                }
                _ => {
                    command = arg.to_string();
                }
            }
        }
        if command == "run" && scenario.is_none() {
            return Err("run requires a scenario path".to_string());
        }
        Ok(Self {
            command,
            scenario,
            format,
            trace,
            policy,
            max_cycles,
        })
    }

    pub fn help() -> &'static str {
        "Usage: sssp_engine [run] [--scenario PATH] [--format text|json] [--policy defer|reject] [--max-cycles N] [--trace]\n       sssp_engine demo\n"
    }
}
