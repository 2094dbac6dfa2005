// GitHub Explorer views
// Views hold per-screen state and translate user actions into manager/service calls.

pub mod dashboard;
