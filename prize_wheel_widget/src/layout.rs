use prize_wheel_core::Sector;

use crate::options::WheelOptions;

/// Paint instructions for one sector.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorPaint {
    pub index: usize,
    pub color: String,
    pub start_deg: f64,
    pub end_deg: f64,
    /// Rotation of the label element.
    pub text_angle: f64,
    pub label: String,
    /// Goes to the sector's `data-sector` attribute.
    pub data_sector: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectorLayout {
    /// Conic gradient origin; sectors are centered on their index angle.
    pub gradient_from: f64,
    pub paints: Vec<SectorPaint>,
}

impl SectorLayout {
    /// Alternating odd/even fill; an odd-count wheel gets the third color on
    /// its last sector so it never touches a same-colored neighbour.
    pub fn build(sectors: &[Sector], options: &WheelOptions) -> Self {
        if sectors.is_empty() {
            return Self::default();
        }
        let n = sectors.len();
        let step = 360.0 / n as f64;
        let odd_count = n % 2 != 0;

        let paints = sectors
            .iter()
            .map(|s| {
                let i = s.index;
                let color = if odd_count && i == n - 1 {
                    &options.color_third
                } else if i % 2 == 0 {
                    &options.color_odd
                } else {
                    &options.color_even
                };
                SectorPaint {
                    index: i,
                    color: color.clone(),
                    start_deg: i as f64 * step,
                    end_deg: (i + 1) as f64 * step,
                    text_angle: i as f64 * step - 90.0,
                    label: s.label.clone(),
                    data_sector: s.value.clone(),
                }
            })
            .collect();

        Self {
            gradient_from: -step / 2.0,
            paints,
        }
    }

    /// CSS `background` value for the wheel face.
    pub fn conic_gradient(&self) -> String {
        let parts: Vec<String> = self
            .paints
            .iter()
            .map(|p| format!("{} {}deg {}deg", p.color, p.start_deg, p.end_deg))
            .collect();
        format!("conic-gradient(from {}deg, {})", self.gradient_from, parts.join(", "))
    }
}
