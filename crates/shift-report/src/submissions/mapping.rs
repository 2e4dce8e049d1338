use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{
    FormType, InterceptorSortieInput, InterceptorSubmission, RadarSubmission, RadarTargetInput,
    Submission,
};
use super::rows::{
    ChildRows, InterceptorSortieRow, MappedSubmission, RadarTargetRow, ShiftDetails, ShiftRow,
};

/// Translates a validated submission into one shift row and its child rows.
///
/// The shift identifier is generated here rather than by the store, so the
/// children can reference it before anything has been written. `created_at`
/// is the capture time supplied by the caller, never a client value.
pub fn map_submission(submission: Submission, created_at: DateTime<Utc>) -> MappedSubmission {
    let shift_id = Uuid::new_v4();

    match submission {
        Submission::Radar(radar) => map_radar(shift_id, radar, created_at),
        Submission::Interceptor(interceptor) => map_interceptor(shift_id, interceptor, created_at),
    }
}

fn map_radar(shift_id: Uuid, radar: RadarSubmission, created_at: DateTime<Utc>) -> MappedSubmission {
    let RadarSubmission { shift, targets } = radar;

    let shift_row = ShiftRow {
        id: shift_id,
        crew_type: FormType::Rls,
        crew_id: shift.crew_id,
        shift_start_time: shift.shift_start_time,
        created_at,
        details: ShiftDetails::Radar {
            rls_id: shift.rls_id,
            rls_position: shift.rls_position,
            rls_type: shift.rls_type,
            sector: shift.sector,
        },
    };

    let children = targets
        .into_iter()
        .map(|target| radar_target_row(shift_id, target))
        .collect();

    MappedSubmission {
        shift: shift_row,
        children: ChildRows::RadarTargets(children),
    }
}

fn radar_target_row(shift_id: Uuid, target: RadarTargetInput) -> RadarTargetRow {
    RadarTargetRow {
        unique_target_id: target.unique_id,
        shift_id,
        turn_number: target.turn_number,
        rada_number: target.rada_target_number,
        entry_time: target.radar_entry_time,
        target_type: target.target_type,
        is_hit: target.is_hit,
        on_radar_edge: target.on_radar_edge,
        video_link: target.kill_video_link,
    }
}

fn map_interceptor(
    shift_id: Uuid,
    interceptor: InterceptorSubmission,
    created_at: DateTime<Utc>,
) -> MappedSubmission {
    let InterceptorSubmission { shift, sorties } = interceptor;

    let shift_row = ShiftRow {
        id: shift_id,
        crew_type: FormType::Interceptor,
        crew_id: shift.crew_id,
        shift_start_time: shift.shift_start_time,
        created_at,
        details: ShiftDetails::Interceptor {
            takeoff_point: shift.takeoff_point,
            board_number: shift.board_number,
        },
    };

    let children = sorties
        .into_iter()
        .map(|sortie| interceptor_sortie_row(shift_id, sortie))
        .collect();

    MappedSubmission {
        shift: shift_row,
        children: ChildRows::InterceptorSorties(children),
    }
}

fn interceptor_sortie_row(shift_id: Uuid, sortie: InterceptorSortieInput) -> InterceptorSortieRow {
    InterceptorSortieRow {
        id: Uuid::new_v4(),
        shift_id,
        target_id_to_intercept: sortie.target_id_to_intercept,
        takeoff_time: sortie.takeoff_time,
        target_type: sortie.target_type,
        hit_success: sortie.hit_success,
        warhead_triggered: sortie.warhead_triggered,
        target_destroyed: sortie.target_destroyed,
        target_status: sortie.target_status,
        board_status: sortie.board_status,
        target_coordinates: sortie.target_coordinates,
        video_link: sortie.video_link,
    }
}
