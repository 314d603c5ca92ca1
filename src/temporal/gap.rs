//! 拡大ウィンドウ用のギャップ（行シフト）処理

use crate::na::NA;

/// 値を `gap` 行だけ後ろにずらした新しいベクトルを返す
///
/// `shifted[i] = values[i - gap]`（`i >= gap`）で、先頭の `gap` 個は NA になります。
/// タイムスタンプはずらさないため、各行から見て直近 `gap` 行のデータは使われません。
/// `gap` がデータ長以上の場合はすべて NA です。
pub fn shift(values: &[NA<f64>], gap: usize) -> Vec<NA<f64>> {
    let n = values.len();
    let lead = gap.min(n);

    let mut shifted = Vec::with_capacity(n);
    shifted.resize(lead, NA::NA);
    shifted.extend_from_slice(&values[..n - lead]);
    shifted
}
