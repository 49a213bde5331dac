use fieldflag::prelude::*;
use fieldflag::{parse_env, Binder, FieldSpec};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    #[default]
    Info,
    Error,
}

impl FlagValue for Level {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        *self = match text.to_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "error" => Level::Error,
            _ => return Err("expected one of debug, info, error".to_string()),
        };
        Ok(())
    }

    fn to_text(&self) -> String {
        format!("{self:?}").to_lowercase()
    }

    fn type_label(&self) -> &'static str {
        "level"
    }
}

#[derive(Debug, Default)]
struct Flags {
    level: Level,
    port: u16,
    ratio: f64,
    hosts: Vec<String>,
}

impl FlagRecord for Flags {
    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>) {
        binder
            .field(
                FieldSpec::new("level")
                    .name("l, level")
                    .usage("The log level.")
                    .env("SERVER_LEVEL"),
                &mut self.level,
            )
            .field(
                FieldSpec::new("port").usage("The port to listen on.").default("0x1f90"),
                &mut self.port,
            )
            .field(FieldSpec::new("ratio").default("0.5"), &mut self.ratio)
            .field(
                FieldSpec::new("hosts").name("#nonflag:HOST").usage("The upstream hosts."),
                &mut self.hosts,
            );
    }
}

fn main() {
    let mut flags = Flags::default();
    parse_env("builder", &mut flags);
    println!("{flags:?}");
}
