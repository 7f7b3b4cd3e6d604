//! Line commands accepted by the demo shell on stdin.

use std::str::FromStr;

use anyhow::{Context, Error, Result, anyhow, bail};

use crate::config::{ContentMode, IndicatorAlignment};
use crate::events::CarouselCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Carousel(CarouselCommand),
    Quit,
}

impl FromStr for HostCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let mut arg = |name: &str| {
            words
                .next()
                .ok_or_else(|| anyhow!("`{verb}` expects <{name}>"))
        };

        let cmd = match verb {
            "quit" | "exit" => return Ok(HostCommand::Quit),
            "drag-begin" => CarouselCommand::DragBegin,
            "drag" => CarouselCommand::DragMove(parse(arg("dx")?, "dx")?),
            "drag-end" => CarouselCommand::DragEnd {
                velocity: parse(arg("velocity")?, "velocity")?,
            },
            "select" => CarouselCommand::IndicatorSelected(parse(arg("page")?, "page")?),
            "resize" => CarouselCommand::ViewportResized {
                width: parse(arg("width")?, "width")?,
                height: parse(arg("height")?, "height")?,
            },
            "interval" => {
                let raw = arg("duration")?;
                let interval = humantime::parse_duration(raw)
                    .with_context(|| format!("invalid duration `{raw}`"))?;
                if interval.is_zero() {
                    bail!("interval must be greater than zero");
                }
                CarouselCommand::SetAutoAdvanceInterval(interval)
            }
            "align" => CarouselCommand::SetIndicatorAlignment(parse_alignment(arg("alignment")?)?),
            "mode" => CarouselCommand::SetContentMode(parse_content_mode(arg("mode")?)?),
            other => bail!("unknown command `{other}`"),
        };
        Ok(HostCommand::Carousel(cmd))
    }
}

fn parse<T>(raw: &str, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("invalid {name} `{raw}`"))
}

fn parse_alignment(raw: &str) -> Result<IndicatorAlignment> {
    Ok(match raw {
        "start" | "left" => IndicatorAlignment::Start,
        "center" => IndicatorAlignment::Center,
        "end" | "right" => IndicatorAlignment::End,
        "hidden" | "none" => IndicatorAlignment::Hidden,
        other => bail!("unknown alignment `{other}`"),
    })
}

fn parse_content_mode(raw: &str) -> Result<ContentMode> {
    Ok(match raw {
        "fill" => ContentMode::Fill,
        "aspect-fit" | "fit" => ContentMode::AspectFit,
        "aspect-fill" => ContentMode::AspectFill,
        other => bail!("unknown content mode `{other}`"),
    })
}
