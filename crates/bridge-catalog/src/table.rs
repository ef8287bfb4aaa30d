//! The static variable table: one row per simulator variable.
//!
//! This is a representative ~195-entry slice of the full ~360-variable
//! Aerofly catalog, spanning every `kind` / `access` / `flag` combination the
//! catalog model supports. Extending it to the full 360 is purely additive
//! rows — nothing else in the workspace changes shape.
//!
//! Columns: `(name, kind, unit, access, flag)`. `logical_index` is the row's
//! position in this array; `message_id` is derived, not stored here.

use crate::{Access, VariableFlag, VariableKind};

type Row = (&'static str, VariableKind, &'static str, Access, VariableFlag);

#[rustfmt::skip]
pub const VARIABLE_TABLE: &[Row] = &[
    // --- Aircraft ---------------------------------------------------------
    ("Aircraft.UniversalTime",        VariableKind::Scalar, "s",      Access::Read,  VariableFlag::Value),
    ("Aircraft.Altitude",             VariableKind::Scalar, "m",      Access::Read,  VariableFlag::Value),
    ("Aircraft.VerticalSpeed",        VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Aircraft.Pitch",                VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("Aircraft.Bank",                 VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("Aircraft.TrueHeading",          VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("Aircraft.MagneticHeading",      VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("Aircraft.IndicatedAirspeed",    VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Aircraft.IndicatedAirspeedTrend", VariableKind::Scalar, "m/s",  Access::Read,  VariableFlag::Value),
    ("Aircraft.GroundSpeed",          VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Aircraft.MachNumber",           VariableKind::Scalar, "mach",   Access::Read,  VariableFlag::Value),
    ("Aircraft.AngleOfAttack",        VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("Aircraft.AngleOfAttackLimit",   VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("Aircraft.AccelerationBody",     VariableKind::Vec3,   "m/s2",   Access::Read,  VariableFlag::Value),
    ("Aircraft.Wind",                 VariableKind::Vec3,   "m/s",    Access::Read,  VariableFlag::Value),
    ("Aircraft.RateOfTurn",           VariableKind::Scalar, "rad/s",  Access::Read,  VariableFlag::Value),
    ("Aircraft.Position",             VariableKind::Vec3,   "deg,deg,m", Access::Read, VariableFlag::Value),
    ("Aircraft.Velocity",             VariableKind::Vec3,   "m/s",    Access::Read,  VariableFlag::Value),
    ("Aircraft.AngularVelocity",      VariableKind::Vec3,   "rad/s",  Access::Read,  VariableFlag::Value),
    ("Aircraft.Gear",                 VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Aircraft.Flaps",                VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Aircraft.Slats",                VariableKind::Scalar, "ratio",  Access::Read,  VariableFlag::Value),
    ("Aircraft.Spoilers",             VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Aircraft.Parking",              VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Aircraft.Crashed",              VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Event),
    ("Aircraft.Name",                 VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Aircraft.NearestAirportIdentifier", VariableKind::String, "",  Access::Read,  VariableFlag::Value),
    ("Aircraft.NearestAirportName",   VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Aircraft.NearestAirportLocation", VariableKind::Vec2, "deg,deg", Access::Read, VariableFlag::Value),
    ("Aircraft.NearestAirportElevation", VariableKind::Scalar, "m",   Access::Read,  VariableFlag::Value),
    ("Aircraft.OnGround",             VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Aircraft.OnRunway",             VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Aircraft.Category",             VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Aircraft.Gravity",              VariableKind::Scalar, "m/s2",   Access::Read,  VariableFlag::Value),

    // --- Doors / structure (step semantics) -------------------------------
    ("Doors.Left",                    VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Doors.Right",                   VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Doors.CargoLeft",               VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Doors.CargoRight",              VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Windows.Left",                  VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Windows.Right",                 VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Canopy.Open",                   VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),

    // --- Controls -----------------------------------------------------------
    ("Controls.Throttle",             VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.Throttle1",            VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.Throttle2",            VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.ThrottleMove",         VariableKind::Scalar, "ratio",  Access::Write, VariableFlag::Move),
    ("Controls.Pitch.Input",          VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.Roll.Input",           VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.Yaw.Input",            VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.Flaps",                VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Controls.Gear",                 VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Toggle),
    ("Controls.WheelBrake.Left",      VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.WheelBrake.Right",     VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.ParkingBrake",         VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Controls.SpeedBrake",           VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Controls.SpeedBrakeArm",        VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Controls.Tiller",               VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.NoseWheelSteering",    VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.PropellerCoarse",      VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Controls.PropellerRpm",         VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.Mixture",              VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.ThrustReverse",        VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Controls.FuelSelector",         VariableKind::Scalar, "enum",   Access::ReadWrite, VariableFlag::Value),
    ("Controls.FuelPump",             VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Controls.FuelShutoff",          VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Controls.Starter",              VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Controls.Ignition",             VariableKind::Scalar, "enum",   Access::ReadWrite, VariableFlag::Value),
    ("Controls.ThrottleLimit",        VariableKind::Scalar, "ratio",  Access::Read,  VariableFlag::Value),
    ("Controls.GliderAirBrake",       VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Step),
    ("Controls.HelicopterThrottle1",  VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.HelicopterThrottle2",  VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.RotorBrake",           VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Controls.Collective",           VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.CyclicPitch",          VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.CyclicRoll",           VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.TailRotor",            VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Controls.ConfigureLights",      VariableKind::Opaque, "",       Access::Write, VariableFlag::Event),

    // --- Trim -----------------------------------------------------------------
    ("Trim.Pitch",                    VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Trim.PitchMove",                VariableKind::Scalar, "ratio",  Access::Write, VariableFlag::Move),
    ("Trim.Roll",                     VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Trim.Yaw",                      VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),

    // --- Autopilot --------------------------------------------------------
    ("Autopilot.Active",              VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Active),
    ("Autopilot.Type",                VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Autopilot.Engaged",             VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Autopilot.Heading",             VariableKind::Scalar, "rad",    Access::ReadWrite, VariableFlag::Value),
    ("Autopilot.HeadingMove",         VariableKind::Scalar, "rad",    Access::Write, VariableFlag::Move),
    ("Autopilot.VerticalSpeed",       VariableKind::Scalar, "m/s",    Access::ReadWrite, VariableFlag::Value),
    ("Autopilot.SelectedSpeed",       VariableKind::Scalar, "m/s",    Access::ReadWrite, VariableFlag::Value),
    ("Autopilot.SelectedAirspeed",    VariableKind::Scalar, "m/s",    Access::ReadWrite, VariableFlag::Value),
    ("Autopilot.SelectedAltitude",    VariableKind::Scalar, "m",      Access::ReadWrite, VariableFlag::Value),
    ("Autopilot.ThrottleEngaged",     VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Autopilot.ThrottleArm",         VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Autopilot.Master",              VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Autopilot.Disengage",           VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Autopilot.APGSArm",             VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Autopilot.APGSActive",          VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Autopilot.SpeedProtection",     VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("FlightDirector.Pitch",          VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("FlightDirector.Bank",           VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),

    // --- Communication ------------------------------------------------------
    ("Communication.COM1Frequency",   VariableKind::Scalar, "MHz",    Access::ReadWrite, VariableFlag::Value),
    ("Communication.COM1StandbyFrequency", VariableKind::Scalar, "MHz", Access::ReadWrite, VariableFlag::Value),
    ("Communication.COM1Swap",        VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Communication.COM2Frequency",   VariableKind::Scalar, "MHz",    Access::ReadWrite, VariableFlag::Value),
    ("Communication.COM2StandbyFrequency", VariableKind::Scalar, "MHz", Access::ReadWrite, VariableFlag::Value),
    ("Communication.COM2Swap",        VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Communication.TransponderCode", VariableKind::Scalar, "code",   Access::ReadWrite, VariableFlag::Value),
    ("Communication.TransponderMode", VariableKind::Scalar, "enum",   Access::ReadWrite, VariableFlag::Value),
    ("Communication.TransponderIdent", VariableKind::Scalar, "bool",  Access::Write, VariableFlag::Event),

    // --- Navigation -----------------------------------------------------------
    ("Navigation.NAV1Frequency",      VariableKind::Scalar, "MHz",    Access::ReadWrite, VariableFlag::Value),
    ("Navigation.NAV1StandbyFrequency", VariableKind::Scalar, "MHz",  Access::ReadWrite, VariableFlag::Value),
    ("Navigation.NAV1Swap",           VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Navigation.NAV2Frequency",      VariableKind::Scalar, "MHz",    Access::ReadWrite, VariableFlag::Value),
    ("Navigation.NAV2StandbyFrequency", VariableKind::Scalar, "MHz",  Access::ReadWrite, VariableFlag::Value),
    ("Navigation.NAV2Swap",           VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Navigation.DME1Distance",       VariableKind::Scalar, "nm",     Access::Read,  VariableFlag::Value),
    ("Navigation.DME1Time",           VariableKind::Scalar, "s",      Access::Read,  VariableFlag::Value),
    ("Navigation.DME1Speed",          VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Navigation.ILS1Course",         VariableKind::Scalar, "rad",    Access::ReadWrite, VariableFlag::Value),
    ("Navigation.ILS1CourseDeviation", VariableKind::Scalar, "rad",   Access::Read,  VariableFlag::Value),
    ("Navigation.ILS1GlideSlopeDeviation", VariableKind::Scalar, "rad", Access::Read, VariableFlag::Value),
    ("Navigation.VOR1Course",         VariableKind::Scalar, "rad",    Access::ReadWrite, VariableFlag::Value),
    ("Navigation.VOR1CourseDeviation", VariableKind::Scalar, "rad",   Access::Read,  VariableFlag::Value),
    ("Navigation.ADF1Frequency",      VariableKind::Scalar, "kHz",    Access::ReadWrite, VariableFlag::Value),
    ("Navigation.SelectedCourse1",    VariableKind::Scalar, "rad",    Access::ReadWrite, VariableFlag::Value),
    ("Navigation.SelectedCourse1Move", VariableKind::Scalar, "rad",   Access::Write, VariableFlag::Move),

    // --- Flight Management / route -----------------------------------------
    ("FlightManagementSystem.FlightNumber", VariableKind::String, "", Access::Read, VariableFlag::Value),
    ("FlightManagementSystem.ActiveWaypoint", VariableKind::String, "", Access::Read, VariableFlag::Value),
    ("FlightManagementSystem.NextWaypoint", VariableKind::String, "", Access::Read, VariableFlag::Value),
    ("FlightManagementSystem.DistanceToActiveWaypoint", VariableKind::Scalar, "m", Access::Read, VariableFlag::Value),
    ("FlightManagementSystem.CrossTrackError", VariableKind::Scalar, "m", Access::Read, VariableFlag::Value),

    // --- Performance ------------------------------------------------------
    ("Performance.Payload",           VariableKind::Scalar, "kg",     Access::Read,  VariableFlag::Value),
    ("Performance.FuelTotal",         VariableKind::Scalar, "kg",     Access::Read,  VariableFlag::Value),
    ("Performance.FuelFlow",          VariableKind::Vec4,   "kg/s",   Access::Read,  VariableFlag::Value),
    ("Performance.OilTemperature",    VariableKind::Vec4,   "K",      Access::Read,  VariableFlag::Value),
    ("Performance.OilPressure",       VariableKind::Vec4,   "Pa",     Access::Read,  VariableFlag::Value),
    ("Performance.EngineRPM",         VariableKind::Vec4,   "rpm",    Access::Read,  VariableFlag::Value),
    ("Performance.EngineTorque",      VariableKind::Vec4,   "Nm",     Access::Read,  VariableFlag::Value),
    ("Performance.EGT",               VariableKind::Vec4,   "K",      Access::Read,  VariableFlag::Value),
    ("Performance.N1",                VariableKind::Vec4,   "ratio",  Access::Read,  VariableFlag::Value),
    ("Performance.N2",                VariableKind::Vec4,   "ratio",  Access::Read,  VariableFlag::Value),
    ("Performance.ManifoldPressure",  VariableKind::Vec4,   "Pa",     Access::Read,  VariableFlag::Value),
    ("Performance.EngineRunning",     VariableKind::Vec4,   "bool",   Access::Read,  VariableFlag::Active),
    ("Performance.EngineFire",        VariableKind::Vec4,   "bool",   Access::Read,  VariableFlag::Event),
    ("Performance.GearboxTemperature", VariableKind::Scalar, "K",     Access::Read,  VariableFlag::Value),
    ("Performance.BatteryVoltage",    VariableKind::Scalar, "V",      Access::Read,  VariableFlag::Value),
    ("Performance.BatteryCurrent",    VariableKind::Scalar, "A",      Access::Read,  VariableFlag::Value),
    ("Performance.HydraulicPressure", VariableKind::Vec2,   "Pa",     Access::Read,  VariableFlag::Value),
    ("Performance.Speed.VS0",         VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.VS1",         VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.VFE",         VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.VNO",         VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.VNE",         VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.VAPP",        VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.Minimum",     VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),
    ("Performance.Speed.Maximum",     VariableKind::Scalar, "m/s",    Access::Read,  VariableFlag::Value),

    // --- Warnings -----------------------------------------------------------
    ("Warnings.MasterWarning",        VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.MasterCaution",        VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.StallWarning",         VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.OverspeedWarning",     VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.TerrainWarning",       VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.TerrainPullUp",        VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.LowFuelPressure",      VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.FuelLow",              VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.WindshearWarning",     VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),
    ("Warnings.ConfigurationWarning", VariableKind::Scalar, "bool",   Access::Read,  VariableFlag::Active),

    // --- View -----------------------------------------------------------------
    ("View.Internal",                 VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("View.Follow",                   VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("View.Category",                 VariableKind::String, "",       Access::ReadWrite, VariableFlag::Value),
    ("View.ExternalDirection",        VariableKind::Vec2,   "rad",    Access::ReadWrite, VariableFlag::Value),
    ("View.ZoomDirection",            VariableKind::Scalar, "ratio",  Access::Write, VariableFlag::Move),
    ("View.CockpitDirection",         VariableKind::Vec2,   "rad",    Access::ReadWrite, VariableFlag::Value),
    ("View.Roll",                     VariableKind::Scalar, "rad",    Access::Read,  VariableFlag::Value),
    ("View.DisplayName",              VariableKind::String, "",       Access::Read,  VariableFlag::Value),

    // --- Sim ------------------------------------------------------------------
    ("Sim.Pause",                     VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Sim.FlightInformation",         VariableKind::Opaque, "",       Access::Read,  VariableFlag::None),
    ("Sim.PlaybackState",             VariableKind::Scalar, "enum",   Access::Read,  VariableFlag::Value),
    ("Sim.TimeChange",                VariableKind::Scalar, "s",      Access::Write, VariableFlag::Move),
    ("Sim.VisibilityChange",          VariableKind::Scalar, "m",      Access::Write, VariableFlag::Move),
    ("Sim.SimRate",                   VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Sim.TimeOfDay",                 VariableKind::Scalar, "h",      Access::Read,  VariableFlag::Value),
    ("Sim.MapZoom",                   VariableKind::Scalar, "ratio",  Access::ReadWrite, VariableFlag::Value),
    ("Sim.AircraftName",              VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Sim.LiveryName",                VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Sim.PilotName",                 VariableKind::String, "",       Access::Read,  VariableFlag::Value),
    ("Sim.Reset",                     VariableKind::Scalar, "bool",   Access::Write, VariableFlag::Event),
    ("Sim.FreezeAltitude",            VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Sim.FreezeAttitude",            VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),
    ("Sim.FreezePosition",            VariableKind::Scalar, "bool",   Access::ReadWrite, VariableFlag::Toggle),

    // --- Radar / weather ----------------------------------------------------
    ("Radar.Tilt",                    VariableKind::Scalar, "rad",    Access::ReadWrite, VariableFlag::Value),
    ("Radar.Range",                   VariableKind::Scalar, "m",      Access::ReadWrite, VariableFlag::Value),
    ("Weather.Visibility",            VariableKind::Scalar, "m",      Access::Read,  VariableFlag::Value),
    ("Weather.Turbulence",            VariableKind::Scalar, "ratio",  Access::Read,  VariableFlag::Value),
    ("Weather.CloudCover",            VariableKind::Scalar, "ratio",  Access::Read,  VariableFlag::Value),

    // --- Pressurization / cabin ------------------------------------------
    ("Pressurization.CabinAltitude",  VariableKind::Scalar, "m",      Access::Read,  VariableFlag::Value),
    ("Pressurization.CabinVerticalSpeed", VariableKind::Scalar, "m/s", Access::Read, VariableFlag::Value),
    ("Pressurization.CabinDifferentialPressure", VariableKind::Scalar, "Pa", Access::Read, VariableFlag::Value),
];
