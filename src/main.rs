use std::{fs, io};

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use codecpref::config::Config;
use codecpref::engine::{Description, NegotiationEngine, Negotiator, StaticEngine};
use codecpref::sdpmunge::{self, CodecEntry, Role, SdpType};

#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Set config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the configured codec preferences and stream ids to a description
    Rewrite {
        /// offer, pranswer, answer or rollback
        #[arg(short = 't', long = "type", default_value = "offer")]
        sdp_type: SdpType,
        /// SDP file, stdin if omitted
        file: Option<String>,
    },
    /// Print the codec table of every media section as JSON
    Codecs {
        /// SDP file, stdin if omitted
        file: Option<String>,
    },
    /// Print what the local webrtc engine supports for a media kind
    Capabilities {
        /// sender or receiver
        #[arg(short, long, default_value = "sender")]
        role: Role,
        kind: String,
    },
}

#[derive(Serialize)]
struct MediaCodecs<'a> {
    media: &'a str,
    codecs: Vec<CodecEntry>,
}

fn read_sdp(file: Option<String>) -> anyhow::Result<String> {
    Ok(match file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    })
}

async fn rewrite(cfg: &Config, sdp_type: SdpType, sdp: String) -> anyhow::Result<String> {
    let track_id = cfg.streams.as_ref().and_then(|s| s.track_id.clone());
    let engine = StaticEngine::from_description(Description::new(sdp_type, sdp), track_id);
    let transceivers = engine
        .transceivers()
        .await
        .map_err(|e| anyhow!("{}", e))?;
    debug!("{} media sections to rewrite", transceivers.len());

    let negotiator = Negotiator::new(engine);
    for (handle, transceiver) in transceivers.iter().enumerate() {
        let codecs = cfg.preferences.get(transceiver.kind).to_vec();
        negotiator
            .set_codec_preferences(handle, Some(codecs))
            .await
            .map_err(|e| anyhow!("{}", e))?;
        if let Some(streams) = &cfg.streams {
            negotiator
                .set_streams(handle, streams.ids.clone())
                .await
                .map_err(|e| anyhow!("{}", e))?;
        }
    }
    let description = match sdp_type {
        SdpType::Offer => negotiator.create_offer().await,
        _ => negotiator.create_answer().await,
    }
    .map_err(|e| anyhow!("{}", e))?;
    Ok(description.sdp)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = Config::parse(args.config);
    cfg.validate()?;

    utils::set_log(format!(
        "codecpref={},sdpmunge={},webrtc=error",
        cfg.log.level, cfg.log.level
    ));

    match args.command {
        Command::Rewrite { sdp_type, file } => {
            let sdp = read_sdp(file)?;
            print!("{}", rewrite(&cfg, sdp_type, sdp).await?);
        }
        Command::Codecs { file } => {
            let sdp = read_sdp(file)?;
            let sections = sdpmunge::split(&sdp);
            let media: Vec<MediaCodecs> = sections
                .iter()
                .filter_map(|section| section.first().map(|line| (line, section)))
                .filter(|(line, _)| sdpmunge::section::is_media_line(line))
                .map(|(line, section)| MediaCodecs {
                    media: line,
                    codecs: sdpmunge::parse_codecs(section),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&media)?);
        }
        Command::Capabilities { role, kind } => {
            info!("{} capabilities for {}", role.interface(), kind);
            let capabilities = codecpref::capabilities::global()
                .get_capabilities(role, Some(&kind))
                .await
                .map_err(|e| anyhow!("{}", e))?;
            println!("{}", serde_json::to_string_pretty(&capabilities)?);
        }
    }
    Ok(())
}
