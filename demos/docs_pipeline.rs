//! Offline ingest run over embedded documentation pages.
//!
//! Chunks two device-documentation sources into YAML chunk files plus a CSV
//! ledger, skipping a cross-platform duplicate along the way. Thresholds
//! honour the `CHUNKMILL_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::FmtSubscriber;

use chunkmill::chunking::{PolicyBuilder, strip_frontmatter};
use chunkmill::ingestion::{IngestPipeline, SourceDocument};
use chunkmill::stores::{CsvLedger, YamlChunkStore};

const GETTING_STARTED: &str = r#"---
title: Getting started
categories: [setup]
---

The board ships without any storage, so the first task is preparing a card
that carries the operating system. Everything in this guide works from a
Linux, macOS, or Windows workstation; the only hardware you need besides
the board itself is a microSD card of at least eight gigabytes and a card
reader. Budget around twenty minutes for the whole process, most of which
is spent waiting for the image to copy.

Once the card is ready the board boots straight into a usable desktop. If
anything goes wrong along the way, each section below ends with the
symptoms we see most often and the quickest way to recover from them.

## Download the image

Grab the latest release image from the downloads page rather than a
mirror, because mirrors occasionally lag behind a point release and the
first-boot updater then has more work to do. The download is a compressed
image of roughly one gigabyte; the page lists a SHA-256 digest next to
each file, and verifying it before flashing saves the most common cause of
mysterious boot failures. On Linux and macOS the digest tool is already
installed. On Windows, the certutil utility bundled with the system
produces the same digest format, so there is nothing extra to install.

## Write the image to a card

Any imaging tool works, but the official imager is the path we test. It
decompresses on the fly, writes the image, and then reads the card back to
confirm the write, which catches worn-out cards before they waste an
afternoon. If you prefer the command line, decompress the image first and
copy it with a plain block-level write:

```sh
xz --decompress image.img.xz
sudo dd if=image.img of=/dev/sdX bs=4M conv=fsync status=progress
```

Replace the output device with the card reader's device node, not a
partition on it. Double-check the node before running the command; a block
write to the wrong disk is unrecoverable. When the command returns, wait
for the activity light on the reader to stop before pulling the card.

## First boot

Insert the card, connect a display and keyboard, and apply power last. The
first boot takes noticeably longer than later ones because the system
resizes its partitions, generates host keys, and builds font caches before
the desktop appears. A welcome wizard then walks through locale, account
creation, and network setup. Skipping the wizard is supported but leaves
the default account enabled, so production devices should complete it.

If the display stays dark for more than two minutes, the usual culprits
are an underpowered supply or an HDMI cable plugged into the wrong port.
The power LED blinking in a repeating pattern indicates the bootloader
could not read the card; reflashing with verification enabled almost
always clears it.

## Expand the filesystem

Images are sized for the smallest supported card, so on larger cards most
of the space starts out unallocated. Recent releases expand the root
filesystem automatically during the first boot; if you are running an
older release or cloned the card from a backup, run the configuration
tool and choose the expand option, then reboot. The operation is safe on
a live system because it only grows the partition. Confirm the new size
afterwards with a disk-usage listing before installing anything large.
"#;

const NETWORKING: &str = r#"## Wired connections

Plugging in an Ethernet cable is all that most networks require; the
interface requests an address over DHCP as soon as the link comes up. The
assigned address appears in the network icon's tooltip and in the output
of the usual address-listing tools. Servers and kiosks that need a stable
address should reserve one on the router rather than configuring it
statically on the device, so the card image stays portable between boards.

## Wireless connections

The desktop image scans for networks on first boot and remembers the
chosen one. Headless installs can pre-seed credentials by dropping a
configuration file into the boot partition before first power-on; the
file is consumed and deleted during boot. Hidden networks and enterprise
authentication both work but need the full configuration dialog rather
than the quick-join list.

## Firewall defaults

Nothing listens on the network out of the box except the optional SSH
service, which is disabled until a file named ssh is placed in the boot
partition. When you enable it, change the default password during the
same session; automated scanners find reachable devices within minutes of
them coming online.
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let out_dir = env::var("DOCS_PIPELINE_OUT").unwrap_or_else(|_| "./chunkmill_out".to_string());
    let out_dir = PathBuf::from(out_dir);
    let chunk_dir = out_dir.join("yaml_data");
    let ledger_path = out_dir.join("info").join("chunk_details.csv");

    let policy = PolicyBuilder::new().with_env().build()?;
    let store = YamlChunkStore::new(&chunk_dir);
    let ledger = CsvLedger::create(&ledger_path).await?;
    let mut pipeline = IngestPipeline::with_policy(policy, store, ledger);

    let sources = demo_sources();
    println!("Found {} source documents to process", sources.len());

    let start = Instant::now();
    for source in sources {
        let url = source.url.clone();
        println!("→ Ingesting {}", url);
        let report = pipeline.ingest(source).await?;
        if report.admitted {
            println!(
                "   stored {} chunks ({} words)",
                report.chunk_ids.len(),
                report.words
            );
        } else {
            println!("⏭︎ Skipping {} (cross-platform duplicate)", url);
        }
    }

    let stats = pipeline.stats();
    println!("\n✅ Ingestion complete!");
    println!("  sources admitted: {}", stats.sources_admitted);
    println!("  sources skipped : {}", stats.sources_rejected);
    println!("  chunks written  : {}", stats.chunks_written);
    println!("  words recorded  : {}", stats.words_recorded);
    println!("  duration        : {:.2?}", start.elapsed());
    println!("  chunk directory : {}", chunk_dir.display());
    println!("  ledger table    : {}", ledger_path.display());

    Ok(())
}

fn demo_sources() -> Vec<SourceDocument> {
    let networking = SourceDocument {
        url: "https://docs.example.com/cross-platform/networking".to_string(),
        title: "Networking".to_string(),
        keywords: vec![
            "Networking".to_string(),
            "DHCP".to_string(),
            "SSH".to_string(),
        ],
        markdown: NETWORKING.to_string(),
        cross_platform: true,
    };

    vec![
        SourceDocument {
            url: "https://docs.example.com/getting-started".to_string(),
            title: "Getting started".to_string(),
            keywords: vec!["Install".to_string(), "Imaging".to_string()],
            markdown: strip_frontmatter(GETTING_STARTED).to_string(),
            cross_platform: false,
        },
        // The networking page is listed under both the desktop and the
        // server category, so the crawl hands it to the pipeline twice.
        networking.clone(),
        networking,
    ]
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
