use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

/// Fuente de tiempo inyectable.
///
/// La validación de años usa `current_year()` en el momento de validar, así
/// que el límite superior se mueve con el calendario. En tests se fija con
/// [`FixedClock`].
pub trait Clock {
  /// Instante actual, usado para las marcas `created` / `last_modified`.
  fn now(&self) -> DateTime<Utc>;

  /// Año natural actual.
  fn current_year(&self) -> i32 {
    self.now().year()
  }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn now(&self) -> DateTime<Utc> {
    (**self).now()
  }

  fn current_year(&self) -> i32 {
    (**self).current_year()
  }
}

/// Reloj del sistema. El año se toma en hora local.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }

  fn current_year(&self) -> i32 {
    Local::now().year()
  }
}

/// Reloj congelado en un instante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
  now: DateTime<Utc>,
}

impl FixedClock {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self { now }
  }

  /// Reloj fijado al 1 de enero (mediodía UTC) del año dado.
  ///
  /// Devuelve `None` si el año no es representable.
  pub fn at_year(year: i32) -> Option<Self> {
    Utc.with_ymd_and_hms(year, 1, 1, 12, 0, 0).single().map(Self::new)
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.now
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fixed_clock_reports_its_year() {
    let clock = FixedClock::at_year(2024).unwrap();
    assert_eq!(clock.current_year(), 2024);
  }

  #[test]
  fn references_are_clocks_too() {
    let clock = FixedClock::at_year(1999).unwrap();
    let by_ref: &dyn Clock = &clock;
    assert_eq!(by_ref.current_year(), 1999);
  }
}
