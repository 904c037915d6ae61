use serde::Deserialize;

/// A single curve key. Tangents are slopes (value per unit of time).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Keyframed curve evaluated with cubic Hermite segments.
///
/// Outside the key range the curve holds its first/last value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "Vec<Keyframe>")]
pub struct ResponseCurve {
    keys: Vec<Keyframe>,
}

impl From<Vec<Keyframe>> for ResponseCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl ResponseCurve {
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight line between two keys
    pub fn linear(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        let duration = time_end - time_start;
        let slope = if duration.abs() > f32::EPSILON {
            (value_end - value_start) / duration
        } else {
            0.0
        };
        Self::new(vec![
            Keyframe::new(time_start, value_start).with_tangents(0.0, slope),
            Keyframe::new(time_end, value_end).with_tangents(slope, 0.0),
        ])
    }

    /// Flat tangents at both ends
    pub fn ease_in_out(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        Self::new(vec![
            Keyframe::new(time_start, value_start),
            Keyframe::new(time_end, value_end),
        ])
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; bounded to 1..len by the checks above
        let next = self.keys.partition_point(|key| key.time <= time);
        let a = &self.keys[next - 1];
        let b = &self.keys[next];
        hermite(a, b, time)
    }

    /// Sampled check that the curve never decreases over its key range
    pub fn is_monotonic(&self) -> bool {
        const SAMPLES: usize = 64;

        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first.time, last.time),
            _ => return true,
        };

        let mut previous = self.evaluate(first);
        (1..=SAMPLES).all(|i| {
            let t = first + (last - first) * i as f32 / SAMPLES as f32;
            let value = self.evaluate(t);
            let ok = value + 1e-5 >= previous;
            previous = value;
            ok
        })
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }
}

fn hermite(a: &Keyframe, b: &Keyframe, time: f32) -> f32 {
    let dt = b.time - a.time;
    if dt <= f32::EPSILON {
        return b.value;
    }

    let s = (time - a.time) / dt;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * a.value + h10 * dt * a.out_tangent + h01 * b.value + h11 * dt * b.in_tangent
}
