/// Substring-aware similarity on a 0..=100 scale.
///
/// The shorter string is slid over every equal-length window of the longer
/// one; the best Levenshtein similarity of any window is the score. A
/// keyword fully contained in the header therefore scores 100.
pub fn partial_ratio(left: &str, right: &str) -> u8 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    let (shorter, longer) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    if shorter.is_empty() {
        return 0;
    }

    let needle: String = shorter.iter().collect();
    let width = shorter.len();
    let mut best_distance = width;
    for window in longer.windows(width) {
        let candidate: String = window.iter().collect();
        let distance = strsim::levenshtein(&needle, &candidate);
        if distance < best_distance {
            best_distance = distance;
            if distance == 0 {
                break;
            }
        }
    }

    (((width - best_distance) * 100) / width) as u8
}
