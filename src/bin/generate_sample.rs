//! Write a deterministic demo ATC export (`sample_atc_findings.csv`) that can
//! be dropped into the app to exercise the full upload → classify → export flow.

use anyhow::{Context, Result};

const OUTPUT_PATH: &str = "sample_atc_findings.csv";
const ROWS: usize = 120;

/// (check title, check message template) pairs typical of S/4HANA readiness runs.
const CHECKS: [(&str, &str); 8] = [
    ("S/4HANA: Field length extension", "Field MATNR of {obj} is used with old length 18"),
    ("S/4HANA: Search for database operations", "Table KONV accessed by {obj} no longer exists"),
    ("S/4HANA: Search for usages of simplified objects", "{obj} uses simplified object VBUK"),
    ("Syntax check", "Statement is not accessible in {obj}"),
    ("Syntax check", "Type 'ZTT_ORDER' unknown in {obj}"),
    ("Extended program check", "Obsolete statement MOVE ... TO in {obj}"),
    ("Performance: SELECT in loop", "Nested SELECT found in {obj}"),
    ("Code Inspector: Unused variables", "Variable LV_TMP is never read in {obj}"),
];

const OBJECTS: [(&str, &str); 6] = [
    ("ZCL_SALES_ORDER_API", "CLAS"),
    ("ZREPORT_STOCK_OVERVIEW", "PROG"),
    ("ZFG_PRICING", "FUGR"),
    ("ZIF_DELIVERY", "INTF"),
    ("ZBILLING_EXIT", "PROG"),
    ("ZCL_MM_HELPER", "CLAS"),
];

const PACKAGES: [&str; 4] = ["ZSALES", "ZMM", "ZFI_CORE", "$TMP"];

/// Minimal deterministic PRNG (xorshift64*).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    writer.write_record([
        "Priority",
        "Check Title",
        "Check Message",
        "Object Name",
        "Object Type",
        "Package",
    ])?;

    for _ in 0..ROWS {
        let (title, message) = *rng.pick(&CHECKS);
        let (object, object_type) = *rng.pick(&OBJECTS);
        let package = *rng.pick(&PACKAGES);
        let priority = (1 + rng.next_u64() % 3).to_string();
        let message = message.replace("{obj}", object);

        writer
            .write_record([
                priority.as_str(),
                title,
                message.as_str(),
                object,
                object_type,
                package,
            ])
            .context("writing sample row")?;
    }
    writer.flush().context("flushing sample CSV")?;

    println!("Wrote {ROWS} ATC findings to {OUTPUT_PATH}");
    Ok(())
}
