//! Static feed corpora used across harnesses.

/// A short, clean feed as the logger writes it.
pub const FEED_CLEAN: &str = "\
3C8A01 05-03-25 08:00:00 21.4 0
3C8A02 05-03-25 08:10:00 22.9 0
3C8A03 05-03-25 08:20:00 24.6 1
3C8A04 05-03-25 08:30:00 26.0 0
3C8A05 05-03-25 08:40:00 27.8 0
3C8A06 05-03-25 08:50:00 28.1 0
3C8A07 05-03-25 09:00:00 27.5 2
3C8A08 05-03-25 09:10:00 26.2 0
";

/// Records in [`FEED_CLEAN`].
pub const FEED_CLEAN_COUNT: usize = 8;

/// The same logger output wrapped in noise: a viewer header, blank lines,
/// CRLF endings, short lines and trailing diagnostics. Six lines survive.
pub const FEED_NOISY: &str = "data viewer\r\n\
\r\n\
3C8A01 05-03-25 08:00:00 21.4 0\r\n\
   \r\n\
3C8A02 05-03-25 08:10:00 22.9 0 rssi=-71 bat=3.61\r\n\
3C8A03 05-03-25 08:20:00\r\n\
3C8A04 2025-03-05 08:30:00 26.0 0\r\n\
3C8A05 05-03-25 08:40:00 n/a 1\r\n\
  3C8A06   05-03-25   08:50:00   28.1   0  \r\n\
3C8A07 31-02-25 09:00:00 27.5 0\r\n\
EOF\r\n";

/// Records that survive [`FEED_NOISY`].
pub const FEED_NOISY_COUNT: usize = 6;

/// Generate `n` well-formed lines for throughput tests.
pub fn feed_high_volume(n: usize) -> String {
    (0..n)
        .map(|i| {
            let minute = i % 60;
            let hour = (i / 60) % 24;
            let day = 1 + (i / 1440) % 28;
            let temp = 20.0 + (i % 170) as f64 / 10.0;
            format!(
                "3C8A{:04X} {day:02}-03-25 {hour:02}:{minute:02}:00 {temp:.1} {}\n",
                i % 0xFFFF,
                i % 3
            )
        })
        .collect()
}
