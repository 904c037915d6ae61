use crate::prelude::*;

/// Walk pawns along their waypoints, keeping their feet on the ground
pub fn patrol_pawns(
    mut pawns: Query<(&mut Pawn, &mut Transform)>,
    time: Res<Time>,
    scene: Option<Res<StaticScene>>,
) {
    let dt = time.delta_seconds();

    for (mut pawn, mut transform) in pawns.iter_mut() {
        let Some(target) = pawn.target() else {
            continue;
        };

        let mut to_target = target - transform.position;
        to_target.y = 0.0;
        let distance = to_target.norm();
        let step = pawn.speed * dt;

        if distance <= step {
            transform.position.x = target.x;
            transform.position.z = target.z;
            pawn.advance();
        } else {
            let heading = to_target / distance;
            transform.position += heading * step;
            transform.rotation = UnitQuaternion::face_towards(&heading, &Vector3::y());
        }

        if let Some(scene) = scene.as_deref() {
            let probe = Point3::new(transform.position.x, transform.position.y + 50.0, transform.position.z);
            if let Some(hit) = scene.raycast(&Ray::down(probe), 1_000.0, LayerMask::ALL) {
                transform.position.y = hit.point.y;
            }
        }
    }
}
