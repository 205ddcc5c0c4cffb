//! Damped spring used to animate scalar presentation values.

/// Physical constants of a spring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub mass: f64,
    pub tension: f64,
    pub friction: f64,
    /// Displacement and velocity below which the spring snaps to its target
    pub precision: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        SpringConfig {
            mass: 1.0,
            tension: 280.0,
            friction: 60.0,
            precision: 0.001,
        }
    }
}

/// Integration step in seconds
const STEP: f64 = 0.001;

/// Scalar value chasing a target under a damped spring force
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Creates a spring resting at `value`
    pub fn at_rest(value: f64, config: SpringConfig) -> Self {
        Spring {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advances the simulation by `dt` seconds in fixed sub-steps
    pub fn step(&mut self, dt: f64) {
        if self.is_settled() || dt <= 0.0 {
            return;
        }
        let SpringConfig {
            mass,
            tension,
            friction,
            precision,
        } = self.config;

        let steps = (dt / STEP).ceil() as usize;
        let h = dt / steps as f64;
        for _ in 0..steps {
            let force = -tension * (self.value - self.target) - friction * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;

            if (self.value - self.target).abs() < precision && self.velocity.abs() < precision {
                self.value = self.target;
                self.velocity = 0.0;
                break;
            }
        }
    }
}
