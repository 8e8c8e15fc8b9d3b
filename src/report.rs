//! Human-readable renderings of a finished run

use std::fmt::Write;

use crate::constants::{durations, gpu, kernel};
use crate::orchestrator::BenchmarkReport;
use crate::scoring::{tier_progress, TIERS};

/// 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Text meter of the progress towards the next tier, e.g. "[#####-----] 50%"
pub fn tier_meter(total: u64, width: usize) -> String {
    let fraction = tier_progress(total).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0
    )
}

/// Plain-text result table for the terminal
pub fn summary(report: &BenchmarkReport) -> String {
    let scores = &report.scores;
    let tier = report.composite.tier;
    let system = &report.system;
    let mut out = String::new();

    let _ = writeln!(out, "=== Titan Bench Results ===");
    let _ = writeln!(out, "{:<14} {:>14}", "Single-Core", group_thousands(scores.cpu_single));
    let _ = writeln!(out, "{:<14} {:>14}", "Multi-Core", group_thousands(scores.cpu_multi));
    let _ = writeln!(out, "{:<14} {:>14}", "GPU Compute", group_thousands(scores.gpu_score));
    let _ = writeln!(out, "{:<14} {:>14}", "Composite", group_thousands(report.composite.total));
    let _ = writeln!(out);
    let _ = writeln!(out, "Tier: {} {}", tier.emoji, tier.name);
    let _ = writeln!(out, "      {}", tier.description);
    let _ = writeln!(out, "      {}", tier_meter(report.composite.total, 20));
    if let Some(ratio) = scores.scaling_ratio() {
        let _ = writeln!(out, "Multi/single scaling: {:.2}x", ratio);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Threads:  {}", system.threads_label());
    let _ = writeln!(out, "Platform: {} ({})", system.platform, system.arch);
    let _ = writeln!(out, "GPU:      {} [{}]", system.gpu_renderer, system.gpu_vendor);
    let _ = writeln!(out, "Backend:  {} / {}", system.gpu_backend, system.gpu_driver);
    let _ = writeln!(
        out,
        "Finished: {}",
        report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

/// Markdown analysis request describing the results, the host and the method
pub fn analysis_markdown(report: &BenchmarkReport) -> String {
    let scores = &report.scores;
    let tier = report.composite.tier;
    let system = &report.system;
    let mut out = String::new();

    let _ = writeln!(out, "# Titan Bench Results Analysis Request\n");

    let _ = writeln!(out, "## My Benchmark Results");
    let _ = writeln!(out, "| Metric | Score | Description |");
    let _ = writeln!(out, "|--------|-------|-------------|");
    let _ = writeln!(
        out,
        "| Single-Core | {} | Single-threaded CPU performance |",
        group_thousands(scores.cpu_single)
    );
    let _ = writeln!(
        out,
        "| Multi-Core | {} | Multi-threaded CPU performance ({} threads used) |",
        group_thousands(scores.cpu_multi),
        system.threads
    );
    let _ = writeln!(
        out,
        "| GPU Compute | {} | Fragment shader throughput |",
        group_thousands(scores.gpu_score)
    );
    let _ = writeln!(
        out,
        "| **Composite** | **{}** | Weighted total score |",
        group_thousands(report.composite.total)
    );
    let _ = writeln!(out, "| Tier Rank | {} | {} |\n", tier.name, tier.description);

    let _ = writeln!(out, "## System Information\n");
    let _ = writeln!(out, "### Host");
    let _ = writeln!(out, "| Property | Value |");
    let _ = writeln!(out, "|----------|-------|");
    let _ = writeln!(out, "| Operating System | {} |", system.platform);
    let _ = writeln!(out, "| Architecture | {} |", system.arch);
    let _ = writeln!(out, "| CPU Threads | {} |\n", system.threads_label());

    let _ = writeln!(out, "### GPU Details");
    let _ = writeln!(out, "| Property | Value |");
    let _ = writeln!(out, "|----------|-------|");
    let _ = writeln!(out, "| GPU Renderer | {} |", system.gpu_renderer);
    let _ = writeln!(out, "| GPU Vendor | {} |", system.gpu_vendor);
    let _ = writeln!(out, "| Driver | {} |", system.gpu_driver);
    let _ = writeln!(out, "| Backend | {} |\n", system.gpu_backend);

    let _ = writeln!(out, "## Benchmark Methodology\n");
    let _ = writeln!(
        out,
        "1. **Single-Core Test** ({}s): Runs sin/cos/sqrt arithmetic on one dedicated thread after a {}ms warm-up. Score = operations completed / {}.\n",
        seconds(durations::SINGLE_CORE_MS),
        kernel::TOTAL_WARMUP_MS,
        kernel::OPS_PER_POINT
    );
    let _ = writeln!(
        out,
        "2. **Multi-Core Test** ({}s): Runs the same workload on one thread per logical core, launches staggered. Score = total operations across all threads / {}.\n",
        seconds(durations::MULTI_CORE_MS),
        kernel::OPS_PER_POINT
    );
    let _ = writeln!(
        out,
        "3. **GPU Compute Test** ({}s): Renders a fragment shader with {} loop iterations per pixel at {}x{} off-screen, waiting for each frame to complete. Score = FPS x {} x consistency bonus (capped at {}).\n",
        seconds(durations::GPU_MS),
        gpu::SHADER_ITERATIONS,
        gpu::SURFACE_WIDTH,
        gpu::SURFACE_HEIGHT,
        gpu::FPS_SCALE,
        gpu::MAX_CONSISTENCY_FACTOR
    );

    let _ = writeln!(out, "### Composite Score Formula");
    let _ = writeln!(out, "```");
    let _ = writeln!(
        out,
        "Composite = (Single-Core x 10) + (Multi-Core x 0.5) + (GPU x 10)"
    );
    let _ = writeln!(out, "```");
    let _ = writeln!(
        out,
        "Multi-core is weighted lower because the thread count behind it is the noisiest input.\n"
    );

    let _ = writeln!(out, "### Tier Thresholds");
    let _ = writeln!(out, "| Tier | Min Score | Use Case |");
    let _ = writeln!(out, "|------|-----------|----------|");
    for tier in TIERS.iter() {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            tier.name,
            group_thousands(tier.min_score),
            tier.description
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Questions for Analysis");
    let _ = writeln!(
        out,
        "1. Based on my GPU renderer string and scores, what device or chip am I likely using?"
    );
    let _ = writeln!(
        out,
        "2. How do my scores compare to typical modern laptops and desktops?"
    );
    let _ = writeln!(
        out,
        "3. Which component (CPU single, CPU multi or GPU) appears to be my bottleneck?"
    );
    let _ = writeln!(
        out,
        "4. Based on these scores, what real-world tasks would my device handle well or struggle with?"
    );
    let scaling = scores
        .scaling_ratio()
        .map(|r| format!(" (currently {:.2}x)", r))
        .unwrap_or_default();
    let _ = write!(
        out,
        "5. What does the single vs multi-core scaling ratio{} suggest about my physical core count?",
        scaling
    );
    out
}

fn seconds(ms: u64) -> String {
    format!("{}", ms as f64 / 1000.0)
}
