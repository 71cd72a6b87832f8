use std::fmt::Debug;
use std::io;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use tracing::trace;

use crate::driver::st::lis3::Lis3;
use crate::orientation::Orientation;

/// Pause between samples when looping.
pub const SAMPLE_INTERVAL_MS: u32 = 2000;

/// Reads, classifies and prints samples: once, or forever with a fixed
/// pause between iterations. The looping form only ends through an external
/// signal, or through a bus error when the driver is strict.
pub fn run<I2C, E, D, W>(
    sensor: &mut Lis3<I2C>,
    delay: &mut D,
    out: &mut W,
    looping: bool,
) -> anyhow::Result<()>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug + Send + Sync + 'static,
    D: DelayMs<u32>,
    W: io::Write,
{
    loop {
        let sample = sensor.read_axes()?;
        trace!("sample = {sample:?}");
        writeln!(out, "{}", Orientation::from_sample(sample))?;

        if !looping {
            break;
        }

        delay.delay_ms(SAMPLE_INTERVAL_MS);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::driver::st::lis3::registers::{reg, CTRL_REG1_INIT, CTRL_REG2_INIT};
    use crate::driver::st::lis3::{Lis3, Strictness, DEFAULT_ADDRESS};
    use embedded_hal_mock::i2c::{Mock, Transaction};
    use embedded_hal_mock::MockError;
    use std::io::ErrorKind;

    const ADDR: u8 = DEFAULT_ADDRESS;

    struct CountingDelay {
        calls: usize,
    }

    impl DelayMs<u32> for CountingDelay {
        fn delay_ms(&mut self, ms: u32) {
            assert_eq!(ms, SAMPLE_INTERVAL_MS);
            self.calls += 1;
        }
    }

    fn init_transactions() -> Vec<Transaction> {
        vec![
            Transaction::write(ADDR, vec![reg::CTRL_REG1, CTRL_REG1_INIT]),
            Transaction::write(ADDR, vec![reg::CTRL_REG2, CTRL_REG2_INIT]),
            Transaction::write_read(ADDR, vec![reg::WHO_AM_I], vec![0x3B]),
        ]
    }

    fn sample_round(x: u8, y: u8, z: u8) -> [Transaction; 3] {
        [
            Transaction::write_read(ADDR, vec![reg::OUT_X], vec![x]),
            Transaction::write_read(ADDR, vec![reg::OUT_Y], vec![y]),
            Transaction::write_read(ADDR, vec![reg::OUT_Z], vec![z]),
        ]
    }

    #[test]
    fn single_shot_prints_one_line_and_never_pauses() {
        let mut transactions = init_transactions();
        transactions.extend(sample_round(0, 200, 200));

        let mut i2c = Mock::new(&transactions);
        let mut sensor = Lis3::new(i2c.clone(), ADDR, Strictness::Strict).unwrap();
        let mut delay = CountingDelay { calls: 0 };
        let mut out = Vec::new();

        run(&mut sensor, &mut delay, &mut out, false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "normal\n");
        assert_eq!(delay.calls, 0);
        i2c.done();
    }

    #[test]
    fn looping_prints_a_line_and_pauses_every_iteration() {
        let mut transactions = init_transactions();
        transactions.extend(sample_round(0, 0, 0));
        transactions.extend(sample_round(200, 0, 0));
        transactions.extend(sample_round(200, 200, 200));
        // the loop has no exit of its own; a strict-mode bus fault bounds it
        // here instead of real elapsed time
        transactions.push(
            Transaction::write_read(ADDR, vec![reg::OUT_X], vec![0])
                .with_error(MockError::Io(ErrorKind::Other)),
        );

        let mut i2c = Mock::new(&transactions);
        let mut sensor = Lis3::new(i2c.clone(), ADDR, Strictness::Strict).unwrap();
        let mut delay = CountingDelay { calls: 0 };
        let mut out = Vec::new();

        let res = run(&mut sensor, &mut delay, &mut out, true);

        assert!(res.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "normal\nleft\ninverted\n");
        assert_eq!(delay.calls, 3);
        i2c.done();
    }
}
