//! # Driver Loop
//!
//! The tokio sweep driver against a shared service, with both the runtime
//! clock (paused) and the domain clock (controllable) under test control.

#[cfg(test)]
mod tests {
    use conn_timeout::test_utils::ControllableTimeSource;
    use conn_timeout::{
        ConnectionTimeoutApi, MockExpiryHandler, SweepDriver, TimeoutConfig, TimeoutService,
    };
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_driver_fires_idle_connections_over_time() {
        let clock = ControllableTimeSource::new(100);
        let handler = MockExpiryHandler::new();
        let service = Arc::new(Mutex::new(TimeoutService::new(
            TimeoutConfig {
                idle_timeout_secs: 15,
                sweep_interval_secs: 5,
                max_connections: 16,
            },
            Box::new(clock.clone()),
            Box::new(handler.clone()),
        )));

        let idle = service
            .lock()
            .unwrap()
            .register_connection("172.16.0.2:7000".parse().unwrap(), 1)
            .unwrap();
        let active = service
            .lock()
            .unwrap()
            .register_connection("172.16.0.3:7000".parse().unwrap(), 2)
            .unwrap();

        let driver = SweepDriver::from_config(Arc::clone(&service));
        tokio::spawn(driver.run());

        // Two sweep intervals pass with the domain clock advancing in step;
        // nothing is due yet, and one client stays active.
        for _ in 0..2 {
            clock.advance(5);
            tokio::time::sleep(Duration::from_secs(5)).await;
            service.lock().unwrap().touch_connection(active);
        }
        assert_eq!(handler.fired_count(), 0);

        // A third interval pushes the idle client past its deadline. The
        // sleep runs past the tick boundary so the sweep lands inside it.
        clock.advance(6);
        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(handler.timed_out(), vec![idle]);

        let stats = service.lock().unwrap().stats();
        assert_eq!(stats.active_connections, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_skips_missed_ticks_without_bursting() {
        let clock = ControllableTimeSource::new(0);
        let handler = MockExpiryHandler::new();
        let service = Arc::new(Mutex::new(TimeoutService::new(
            TimeoutConfig::for_testing(),
            Box::new(clock.clone()),
            Box::new(handler.clone()),
        )));

        service
            .lock()
            .unwrap()
            .register_connection("172.16.0.4:7000".parse().unwrap(), 3)
            .unwrap();

        let driver = SweepDriver::new(Arc::clone(&service), Duration::from_secs(1));
        tokio::spawn(driver.run());

        // A long stall: many intervals elapse at once. The connection fires
        // exactly once regardless of how many ticks were missed.
        clock.advance(120);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(handler.fired_count(), 1);
    }
}
