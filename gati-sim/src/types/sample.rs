//! IMU sample type
//!
//! Body frame convention used throughout the generator:
//! - **X = forward**
//! - **Y = lateral** (positive towards the inside of a left turn)
//! - **Z = vertical**, gravity reads as `-g` when level

/// One timestamped 9-axis IMU reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSample {
    /// Absolute time in seconds
    pub timestamp: f64,
    /// Accelerometer data (m/s²), z includes gravity
    pub accel: [f64; 3], // x, y, z
    /// Gyroscope data (rad/s)
    pub gyro: [f64; 3], // x, y, z
    /// Magnetometer data (μT)
    pub mag: [f64; 3], // x, y, z
}

impl ImuSample {
    /// Create a new sample
    pub fn new(timestamp: f64, accel: [f64; 3], gyro: [f64; 3], mag: [f64; 3]) -> Self {
        Self {
            timestamp,
            accel,
            gyro,
            mag,
        }
    }

    /// Sample with a placeholder timestamp, as returned by scenario physics
    pub fn unstamped(accel: [f64; 3], gyro: [f64; 3], mag: [f64; 3]) -> Self {
        Self::new(0.0, accel, gyro, mag)
    }

    /// Copy of this sample placed at `timestamp`
    #[inline]
    pub fn with_timestamp(self, timestamp: f64) -> Self {
        Self { timestamp, ..self }
    }

    pub fn accel_x(&self) -> f64 {
        self.accel[0]
    }
    pub fn accel_y(&self) -> f64 {
        self.accel[1]
    }
    pub fn accel_z(&self) -> f64 {
        self.accel[2]
    }
    pub fn gyro_x(&self) -> f64 {
        self.gyro[0]
    }
    pub fn gyro_y(&self) -> f64 {
        self.gyro[1]
    }
    pub fn gyro_z(&self) -> f64 {
        self.gyro[2]
    }
    pub fn mag_x(&self) -> f64 {
        self.mag[0]
    }
    pub fn mag_y(&self) -> f64 {
        self.mag[1]
    }
    pub fn mag_z(&self) -> f64 {
        self.mag[2]
    }

    /// Timestamp in milliseconds (CSV schema unit)
    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp * 1000.0
    }

    /// Get accelerometer magnitude
    pub fn accel_magnitude(&self) -> f64 {
        (self.accel[0].powi(2) + self.accel[1].powi(2) + self.accel[2].powi(2)).sqrt()
    }

    /// Get gyroscope magnitude
    pub fn gyro_magnitude(&self) -> f64 {
        (self.gyro[0].powi(2) + self.gyro[1].powi(2) + self.gyro[2].powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_timestamp_keeps_channels() {
        let s = ImuSample::unstamped([1.0, 2.0, 3.0], [0.1, 0.2, 0.3], [20.0, 0.0, -40.0]);
        let stamped = s.with_timestamp(1.5);

        assert_eq!(stamped.timestamp, 1.5);
        assert_eq!(stamped.accel, s.accel);
        assert_eq!(stamped.gyro, s.gyro);
        assert_eq!(stamped.mag, s.mag);
        // Original is untouched
        assert_eq!(s.timestamp, 0.0);
    }

    #[test]
    fn test_magnitudes() {
        let s = ImuSample::unstamped([3.0, 0.0, -4.0], [0.0, 0.0, 0.5], [0.0; 3]);
        assert_eq!(s.accel_magnitude(), 5.0);
        assert_eq!(s.gyro_magnitude(), 0.5);
        assert_eq!(s.accel_z(), -4.0);
        assert_eq!(s.gyro_z(), 0.5);
    }
}
