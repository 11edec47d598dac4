use serde::Serialize;

/// Документированные приближения, о которых нужно сообщать вызывающему.
///
/// Это не ошибки: результат остаётся пригодным, но часть значений получена не
/// измерением, а допущением.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Approximation {
    /// RINEX: фиксированные номинальные 10 м / 15 м вместо расчёта по
    /// псевдодальностям
    NominalRinexAccuracy,
    /// SBF: точности декодированы как Q8.24 по смещениям 84/88, формат не
    /// сверен с документацией приёмника
    UnverifiedFixedPointAccuracy,
    /// SBF: горизонтальная точность поделена поровну между E и N
    EqualSplitHorizontal,
}

impl std::fmt::Display for Approximation {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Approximation::NominalRinexAccuracy => write!(
                f,
                "RINEX sigma uses fixed nominal accuracy (10 m horizontal, 15 m vertical), not measured values"
            ),
            Approximation::UnverifiedFixedPointAccuracy => write!(
                f,
                "SBF accuracies decoded as Q8.24 at payload offsets 84/88; format not verified against receiver documentation"
            ),
            Approximation::EqualSplitHorizontal => write!(
                f,
                "SBF horizontal accuracy split equally into East/North (h / sqrt(2))"
            ),
        }
    }
}
