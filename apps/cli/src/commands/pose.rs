//! pose 命令
//!
//! 位姿转换诊断：欧拉位姿与 4×4 齐次矩阵互转

use anyhow::{Context, Result};
use clap::Subcommand;
use gcode_arm::geometry::nalgebra::DMatrix;
use gcode_arm::{EulerPose, Pose, euler_from_matrix, invert_matrix};

/// 位姿命令
#[derive(Subcommand, Debug)]
pub enum PoseCommand {
    /// 位置 + 欧拉角（mm / 度）转为 4×4 矩阵
    ToMatrix {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
        #[arg(allow_negative_numbers = true)]
        rx: f64,
        #[arg(allow_negative_numbers = true)]
        ry: f64,
        #[arg(allow_negative_numbers = true)]
        rz: f64,
    },

    /// 按行排列的矩阵元素转为位置 + 欧拉角
    ToEuler {
        /// 矩阵元素（按行排列，4×4 时为 16 个）
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<f64>,

        /// 矩阵行数
        #[arg(long, default_value_t = 4)]
        rows: usize,
    },
}

impl PoseCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            PoseCommand::ToMatrix {
                x,
                y,
                z,
                rx,
                ry,
                rz,
            } => {
                let pose = Pose::from_euler(EulerPose::new(x, y, z, rx, ry, rz));
                print_pose(&pose);
                Ok(())
            },

            PoseCommand::ToEuler { values, rows } => {
                let matrix = build_matrix(rows, &values)?;
                let euler = euler_from_matrix(&matrix).context("无法解析位姿矩阵")?;
                let inverse = invert_matrix(&matrix).context("无法求逆")?;

                println!("📍 位置 + 欧拉角: {}", euler);
                println!("🔄 逆位姿: {}", inverse);
                println!("🧭 四元数: {}", Pose::from_euler(euler).to_quaternion());
                Ok(())
            },
        }
    }
}

/// 按行数切分元素，构造动态矩阵
fn build_matrix(rows: usize, values: &[f64]) -> Result<DMatrix<f64>> {
    if rows == 0 || values.len() % rows != 0 {
        anyhow::bail!("{} 个元素无法排成 {} 行", values.len(), rows);
    }
    Ok(DMatrix::from_row_slice(rows, values.len() / rows, values))
}

fn print_pose(pose: &Pose) {
    println!("📐 4×4 矩阵:");
    for row in pose.to_row_array().chunks(4) {
        println!(
            "  [{:>12.6}, {:>12.6}, {:>12.6}, {:>12.6}]",
            row[0], row[1], row[2], row[3]
        );
    }
    println!("🧭 四元数: {}", pose.to_quaternion());
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcode_arm::GeometryError;

    #[test]
    fn test_to_matrix() {
        let cmd = PoseCommand::ToMatrix {
            x: 100.0,
            y: 50.0,
            z: 200.0,
            rx: 180.0,
            ry: 0.0,
            rz: -45.0,
        };
        cmd.execute().unwrap();
    }

    #[test]
    fn test_to_euler_round_trip() {
        let pose = Pose::from_euler(EulerPose::new(1.0, 2.0, 3.0, 10.0, 20.0, 30.0));
        let cmd = PoseCommand::ToEuler {
            values: pose.to_row_array().to_vec(),
            rows: 4,
        };
        cmd.execute().unwrap();
    }

    #[test]
    fn test_non_square_matrix_is_invalid_pose() {
        let matrix = build_matrix(3, &[0.0; 12]).unwrap();
        let err = euler_from_matrix(&matrix).unwrap_err();
        assert_eq!(err, GeometryError::InvalidPose { rows: 3, cols: 4 });

        let cmd = PoseCommand::ToEuler {
            values: vec![0.0; 12],
            rows: 3,
        };
        assert!(cmd.execute().is_err());
    }

    #[test]
    fn test_ragged_values_rejected() {
        assert!(build_matrix(4, &[1.0; 15]).is_err());
        assert!(build_matrix(0, &[1.0; 16]).is_err());
    }
}
