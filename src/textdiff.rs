//! line-level diff via longest common subsequence
//!
//! emits the full merged sequence (no hunk grouping). reconstruction
//! prefers the right side on ties, which fixes the output for any given
//! input pair.

/// one output line of a text diff
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffLine {
    /// `' '` context, `'-'` left only, `'+'` right only
    pub tag: char,
    pub text: String,
}

/// split into lines; a terminal newline does not produce an empty line
fn split_lines(s: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = s.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// diff two texts line by line
pub fn diff_lines(a: &str, b: &str) -> Vec<DiffLine> {
    let a_lines = split_lines(a);
    let b_lines = split_lines(b);
    let n = a_lines.len();
    let m = b_lines.len();

    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in 0..n {
        for j in 0..m {
            dp[i + 1][j + 1] = if a_lines[i] == b_lines[j] {
                dp[i][j] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut out = Vec::new();
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a_lines[i - 1] == b_lines[j - 1] {
            out.push(DiffLine {
                tag: ' ',
                text: a_lines[i - 1].to_string(),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            out.push(DiffLine {
                tag: '+',
                text: b_lines[j - 1].to_string(),
            });
            j -= 1;
        } else {
            out.push(DiffLine {
                tag: '-',
                text: a_lines[i - 1].to_string(),
            });
            i -= 1;
        }
    }
    out.reverse();
    out
}
